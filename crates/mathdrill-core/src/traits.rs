//! Attempt recording seam.
//!
//! Every answered problem is handed to an [`AttemptRecorder`]. The drill
//! logic does not care whether attempts end up in memory, in a JSONL file,
//! or in a hosted database.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::Attempt;

/// Sink for answered problems.
pub trait AttemptRecorder {
    /// Persist a single attempt.
    fn record(&mut self, attempt: &Attempt) -> Result<()>;
}

/// Keeps attempts in memory, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    attempts: Vec<Attempt>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts recorded so far, oldest first.
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }
}

impl AttemptRecorder for MemoryRecorder {
    fn record(&mut self, attempt: &Attempt) -> Result<()> {
        self.attempts.push(attempt.clone());
        Ok(())
    }
}

/// Appends one JSON object per line to a file.
#[derive(Debug)]
pub struct JsonlRecorder {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlRecorder {
    /// Open `path` for appending, creating it and its parent directory if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create attempt log directory: {}", parent.display())
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open attempt log: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Read every attempt back from a JSONL file.
    pub fn read_all(path: &Path) -> Result<Vec<Attempt>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read attempt log: {}", path.display()))?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("bad attempt on line {} of {}", i + 1, path.display()))
            })
            .collect()
    }
}

impl AttemptRecorder for JsonlRecorder {
    fn record(&mut self, attempt: &Attempt) -> Result<()> {
        let line = serde_json::to_string(attempt).context("failed to serialize attempt")?;
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("failed to write attempt to {}", self.path.display()))
    }
}
