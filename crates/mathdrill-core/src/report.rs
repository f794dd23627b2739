//! Test reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{GameModule, Mode, SessionRecord, TestBatch};
use crate::scoring::TestOutcome;

/// A graded test, as saved after the learner submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The batch that was answered.
    pub batch: TestBatch,
    /// Grading of the batch.
    pub outcome: TestOutcome,
    /// Time spent on the test.
    #[serde(default)]
    pub duration_seconds: u64,
}

impl TestReport {
    pub fn new(batch: TestBatch, outcome: TestOutcome, duration_seconds: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            batch,
            outcome,
            duration_seconds,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: TestReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// The session record a test contributes to progress statistics.
    ///
    /// A duration too large to subtract from `created_at` starts the session
    /// at `created_at`.
    pub fn to_session(&self) -> SessionRecord {
        let started_at = i64::try_from(self.duration_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|elapsed| self.created_at.checked_sub_signed(elapsed))
            .unwrap_or(self.created_at);

        SessionRecord {
            id: self.id.to_string(),
            module: GameModule::from(self.batch.operation),
            mode: Mode::Test,
            started_at,
            completed_at: Some(self.created_at),
            duration_seconds: self.duration_seconds,
            correct_count: self.outcome.correct_count as u32,
            total_attempts: self.outcome.total as u32,
            completed: true,
        }
    }
}

/// Save any serializable value (a batch, a list of sessions) as pretty JSON.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Load a JSON file written by [`save_json`].
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
