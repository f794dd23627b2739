//! The `mathdrill grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mathdrill_core::report::{load_json, TestReport};
use mathdrill_core::scoring::grade_batch;
use mathdrill_core::statistics::format_duration;
use mathdrill_core::traits::{AttemptRecorder, JsonlRecorder};
use mathdrill_core::TestBatch;

use super::append_session;

pub fn execute(
    batch_path: PathBuf,
    answers: String,
    duration: u64,
    report_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    sessions_path: Option<PathBuf>,
) -> Result<()> {
    let batch: TestBatch = load_json(&batch_path)
        .with_context(|| format!("failed to load batch: {}", batch_path.display()))?;

    let given = parse_answers(&answers);
    if given.len() > batch.len() {
        eprintln!(
            "Warning: {} answers given for {} problems, extra answers ignored",
            given.len(),
            batch.len()
        );
    }

    let outcome = grade_batch(&batch, &given);

    println!(
        "Score: {}/{} ({}%) {}",
        outcome.correct_count,
        outcome.total,
        outcome.percentage(),
        outcome.verdict()
    );
    if duration > 0 {
        println!("Time: {}", format_duration(duration));
    }

    let missed: Vec<_> = outcome.incorrect().collect();
    if !missed.is_empty() {
        println!("\nMissed:");
        for g in missed {
            let said = if g.user_answer.is_empty() {
                "blank".to_string()
            } else {
                format!("you said {}", g.user_answer)
            };
            println!("  {} = {} ({said})", g.problem, g.problem.result);
        }
    }

    if let Some(path) = &log_path {
        let mut recorder = JsonlRecorder::open(path)?;
        for attempt in outcome.attempts() {
            recorder.record(&attempt)?;
        }
    }

    let report = TestReport::new(batch, outcome, duration);
    if let Some(path) = &sessions_path {
        append_session(path, report.to_session())?;
    }
    if let Some(path) = &report_path {
        report.save_json(path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

/// Split a comma-separated answer list, keeping blank entries in place.
fn parse_answers(answers: &str) -> Vec<String> {
    if answers.trim().is_empty() {
        return Vec::new();
    }
    answers.split(',').map(|a| a.trim().to_string()).collect()
}
