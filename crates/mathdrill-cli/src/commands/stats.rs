//! The `mathdrill stats` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};

use mathdrill_core::statistics::{
    format_duration, format_relative_date, session_accuracy, summarize,
};

use super::load_sessions;

/// Sessions listed under "Recent".
const RECENT_LIMIT: usize = 5;

pub fn execute(sessions_path: PathBuf, now: Option<String>, format: String) -> Result<()> {
    anyhow::ensure!(
        sessions_path.exists(),
        "sessions file not found: {}",
        sessions_path.display()
    );
    let mut sessions = load_sessions(&sessions_path)?;

    let now: DateTime<Utc> = match now {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .with_context(|| format!("invalid --now timestamp: {s}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let summary = summarize(&sessions, now);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "Sessions: {} ({} completed)",
        summary.total_sessions, summary.completed_sessions
    );
    println!("This week: {}", summary.sessions_this_week);
    println!("Average accuracy: {}%", summary.average_accuracy);
    println!(
        "Practice time: {}",
        format_duration(summary.total_practice_seconds)
    );

    if !summary.modules.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Module", "Sessions", "Correct", "Attempts", "Accuracy"]);
        for m in &summary.modules {
            table.add_row(vec![
                Cell::new(m.module),
                Cell::new(m.session_count),
                Cell::new(m.total_correct),
                Cell::new(m.total_attempts),
                Cell::new(format!("{}%", m.accuracy)),
            ]);
        }
        println!("\n{table}");
    }

    sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    if !sessions.is_empty() {
        println!("\nRecent:");
        let today = now.date_naive();
        for s in sessions.iter().take(RECENT_LIMIT) {
            println!(
                "  {:<10} {:<15} {:>4}%  {}",
                format_relative_date(s.started_at, today),
                s.module.to_string(),
                session_accuracy(s),
                format_duration(s.duration_seconds)
            );
        }
    }

    Ok(())
}
