//! The `mathdrill drill` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use mathdrill_core::config::load_config_from;
use mathdrill_core::session::StudySession;
use mathdrill_core::statistics::format_duration;
use mathdrill_core::traits::{AttemptRecorder, JsonlRecorder, MemoryRecorder};
use mathdrill_core::{Generator, Operation};
use rand::Rng;

use super::append_session;

pub fn execute(
    operation: Operation,
    goal: Option<u32>,
    seed: Option<u64>,
    log_path: Option<PathBuf>,
    sessions_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let goal = goal.unwrap_or(config.study_goal);
    anyhow::ensure!(goal >= 1, "goal must be at least 1");

    let mut generator = Generator::from_seed_option(seed.or(config.seed));
    let mut session = StudySession::new(operation, goal);
    let mut recorder: Box<dyn AttemptRecorder> = match &log_path {
        Some(path) => Box::new(JsonlRecorder::open(path)?),
        None => Box::new(MemoryRecorder::new()),
    };

    let started = Instant::now();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(
        &mut session,
        &mut generator,
        recorder.as_mut(),
        stdin.lock(),
        stdout.lock(),
    )?;
    let elapsed = started.elapsed();

    if session.is_complete() {
        println!(
            "Session complete! {} correct in {} tries ({})",
            session.correct_count(),
            session.total_attempts(),
            format_duration(elapsed.as_secs())
        );
    } else {
        println!(
            "Stopped at {}/{} correct",
            session.correct_count(),
            session.goal()
        );
    }

    if let Some(path) = &sessions_path {
        append_session(path, session.finish(elapsed))?;
    }

    Ok(())
}

/// Ask problems until the goal is reached or input runs out.
///
/// Blank lines are ignored; a wrong answer keeps the same problem.
fn run<G, I, O>(
    session: &mut StudySession,
    generator: &mut Generator<G>,
    recorder: &mut dyn AttemptRecorder,
    input: I,
    mut out: O,
) -> Result<()>
where
    G: Rng,
    I: BufRead,
    O: Write,
{
    let mut lines = input.lines();
    let mut problem = generator.problem(session.operation());

    while !session.is_complete() {
        writeln!(out, "{problem} = ?")?;
        out.flush()?;

        let answer = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break Some(line);
                    }
                }
                None => break None,
            }
        };
        let Some(answer) = answer else {
            break;
        };

        if session.submit(&problem, &answer, recorder)? {
            writeln!(
                out,
                "ROAR! {}/{}",
                session.correct_count(),
                session.goal()
            )?;
            problem = generator.problem(session.operation());
        } else {
            writeln!(out, "Try again!")?;
        }
    }

    Ok(())
}
