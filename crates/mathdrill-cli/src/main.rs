//! mathdrill CLI: arithmetic drills and progress stats from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mathdrill_core::{Operation, UniquenessPolicy};
use tracing_subscriber::EnvFilter;

mod commands;

const MAX_TEST_SECONDS: u64 = 24 * 60 * 60;

#[derive(Parser)]
#[command(name = "mathdrill", version, about = "Arithmetic drills for young learners")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print free-practice problems
    Practice {
        /// addition, subtraction, or multiplication
        #[arg(long)]
        operation: Operation,

        /// Number of problems
        #[arg(long, default_value = "10")]
        count: usize,

        /// RNG seed for a reproducible list
        #[arg(long)]
        seed: Option<u64>,

        /// Include the answers
        #[arg(long)]
        answers: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Generate a fixed-operand test batch
    Test {
        /// addition, subtraction, or multiplication
        #[arg(long)]
        operation: Operation,

        /// The number to drill (1-9)
        #[arg(long)]
        number: i32,

        /// Repeated operand handling: spread, strict, independent
        #[arg(long)]
        policy: Option<UniquenessPolicy>,

        /// RNG seed for a reproducible batch
        #[arg(long)]
        seed: Option<u64>,

        /// Save the batch as JSON for `mathdrill grade`
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade answers to a saved test batch
    Grade {
        /// Batch JSON written by `mathdrill test --output`
        #[arg(long)]
        batch: PathBuf,

        /// Comma-separated answers in problem order (blank entries allowed)
        #[arg(long, allow_hyphen_values = true)]
        answers: String,

        /// Seconds spent on the test (at most one day)
        #[arg(
            long,
            default_value = "0",
            value_parser = clap::value_parser!(u64).range(..=MAX_TEST_SECONDS)
        )]
        duration: u64,

        /// Save the graded report as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Append each answer to a JSONL attempt log
        #[arg(long)]
        log: Option<PathBuf>,

        /// Append the finished session to a sessions JSON file
        #[arg(long)]
        sessions: Option<PathBuf>,
    },

    /// Interactive study drill reading answers from stdin
    Drill {
        /// addition, subtraction, or multiplication
        #[arg(long)]
        operation: Operation,

        /// Correct answers needed to finish (default from config, normally 25)
        #[arg(long)]
        goal: Option<u32>,

        /// RNG seed for a reproducible drill
        #[arg(long)]
        seed: Option<u64>,

        /// Append each answer to a JSONL attempt log
        #[arg(long)]
        log: Option<PathBuf>,

        /// Append the finished session to a sessions JSON file
        #[arg(long)]
        sessions: Option<PathBuf>,
    },

    /// Summarize progress from a sessions JSON file
    Stats {
        /// Sessions JSON file
        #[arg(long)]
        sessions: PathBuf,

        /// Reference time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mathdrill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    let result = match cli.command {
        Commands::Practice {
            operation,
            count,
            seed,
            answers,
            format,
        } => commands::practice::execute(operation, count, seed, answers, format, config_path),
        Commands::Test {
            operation,
            number,
            policy,
            seed,
            output,
            format,
        } => commands::test::execute(operation, number, policy, seed, output, format, config_path),
        Commands::Grade {
            batch,
            answers,
            duration,
            report,
            log,
            sessions,
        } => commands::grade::execute(batch, answers, duration, report, log, sessions),
        Commands::Drill {
            operation,
            goal,
            seed,
            log,
            sessions,
        } => commands::drill::execute(operation, goal, seed, log, sessions, config_path),
        Commands::Stats {
            sessions,
            now,
            format,
        } => commands::stats::execute(sessions, now, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
