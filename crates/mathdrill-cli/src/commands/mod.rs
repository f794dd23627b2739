//! Subcommand implementations.

pub mod drill;
pub mod grade;
pub mod init;
pub mod practice;
pub mod stats;

use std::path::Path;

use anyhow::Result;
use mathdrill_core::report::{load_json, save_json};
use mathdrill_core::SessionRecord;

/// Load sessions from a JSON file, treating a missing file as empty.
pub fn load_sessions(path: &Path) -> Result<Vec<SessionRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    load_json(path)
}

/// Append one session to a sessions JSON file, creating it if needed.
pub fn append_session(path: &Path, session: SessionRecord) -> Result<()> {
    let mut sessions = load_sessions(path)?;
    sessions.push(session);
    save_json(&sessions, path)?;
    tracing::info!(path = %path.display(), total = sessions.len(), "session saved");
    Ok(())
}
