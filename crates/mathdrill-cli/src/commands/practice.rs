//! The `mathdrill practice` command.

use std::path::PathBuf;

use anyhow::Result;

use mathdrill_core::config::load_config_from;
use mathdrill_core::{Generator, Operation, Problem};

pub fn execute(
    operation: Operation,
    count: usize,
    seed: Option<u64>,
    show_answers: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(count >= 1, "count must be at least 1");
    let config = load_config_from(config_path.as_deref())?;

    let mut generator = Generator::from_seed_option(seed.or(config.seed));
    let problems: Vec<Problem> = (0..count).map(|_| generator.problem(operation)).collect();

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&problems)?),
        _ => {
            for (i, p) in problems.iter().enumerate() {
                if show_answers {
                    println!("{:>3}. {p} = {}", i + 1, p.result);
                } else {
                    println!("{:>3}. {p} = ?", i + 1);
                }
            }
        }
    }

    Ok(())
}
