//! Progress statistics over completed sessions.
//!
//! Accuracies are whole percentages, rounded half away from zero.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{GameModule, SessionRecord};

/// Accuracy of one session, 0 when nothing was attempted.
pub fn session_accuracy(session: &SessionRecord) -> u32 {
    percent(session.correct_count as u64, session.total_attempts as u64)
}

/// Mean of per-session accuracies.
///
/// Sessions without attempts count as 0% but still count towards the mean.
pub fn average_accuracy(sessions: &[SessionRecord]) -> u32 {
    if sessions.is_empty() {
        return 0;
    }
    let total: f64 = sessions
        .iter()
        .filter(|s| s.total_attempts > 0)
        .map(|s| s.correct_count as f64 / s.total_attempts as f64 * 100.0)
        .sum();
    (total / sessions.len() as f64).round() as u32
}

/// Sessions completed within the seven days before `now`.
pub fn sessions_this_week(sessions: &[SessionRecord], now: DateTime<Utc>) -> usize {
    let one_week_ago = now - Duration::days(7);
    sessions
        .iter()
        .filter(|s| s.completed_at.is_some_and(|at| at > one_week_ago))
        .count()
}

/// Totals for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStats {
    pub module: GameModule,
    pub session_count: usize,
    pub total_correct: u64,
    pub total_attempts: u64,
    /// Accuracy over all attempts in the module.
    pub accuracy: u32,
}

/// Per-module totals, busiest module first, ties in module-name order.
pub fn module_breakdown(sessions: &[SessionRecord]) -> Vec<ModuleStats> {
    let mut grouped: HashMap<GameModule, (usize, u64, u64)> = HashMap::new();
    for s in sessions {
        let entry = grouped.entry(s.module).or_default();
        entry.0 += 1;
        entry.1 += s.correct_count as u64;
        entry.2 += s.total_attempts as u64;
    }

    let mut result: Vec<ModuleStats> = grouped
        .into_iter()
        .map(|(module, (count, correct, attempts))| ModuleStats {
            module,
            session_count: count,
            total_correct: correct,
            total_attempts: attempts,
            accuracy: percent(correct, attempts),
        })
        .collect();

    result.sort_by(|a, b| {
        b.session_count
            .cmp(&a.session_count)
            .then_with(|| a.module.to_string().cmp(&b.module.to_string()))
    });
    result
}

/// Summary shown on the progress dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub sessions_this_week: usize,
    pub average_accuracy: u32,
    pub total_practice_seconds: u64,
    pub modules: Vec<ModuleStats>,
}

/// Compute the dashboard summary in one pass over the data.
pub fn summarize(sessions: &[SessionRecord], now: DateTime<Utc>) -> ProgressSummary {
    ProgressSummary {
        total_sessions: sessions.len(),
        completed_sessions: sessions.iter().filter(|s| s.completed).count(),
        sessions_this_week: sessions_this_week(sessions, now),
        average_accuracy: average_accuracy(sessions),
        total_practice_seconds: sessions.iter().map(|s| s.duration_seconds).sum(),
        modules: module_breakdown(sessions),
    }
}

/// Format seconds as `m:ss`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// "Today", "Yesterday", or a short date like "Jan 5".
pub fn format_relative_date(date: DateTime<Utc>, today: NaiveDate) -> String {
    let day = date.date_naive();
    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
