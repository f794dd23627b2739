//! Drill configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::UniquenessPolicy;
use crate::session::DEFAULT_STUDY_GOAL;

/// Top-level mathdrill configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// How repeated operands are handled in test batches.
    #[serde(default)]
    pub uniqueness: UniquenessPolicy,
    /// Correct answers needed to finish a study session.
    #[serde(default = "default_study_goal")]
    pub study_goal: u32,
    /// Fixed RNG seed for reproducible drills.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_study_goal() -> u32 {
    DEFAULT_STUDY_GOAL
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            uniqueness: UniquenessPolicy::default(),
            study_goal: default_study_goal(),
            seed: None,
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mathdrill.toml` in the current directory
/// 2. `~/.config/mathdrill/config.toml`
///
/// Environment variable override: `MATHDRILL_SEED`.
pub fn load_config() -> Result<DrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => DrillConfig::default(),
    };

    if let Ok(seed) = std::env::var("MATHDRILL_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("MATHDRILL_SEED is not a number: {seed}"))?,
        );
    }

    Ok(config)
}

/// Parse and validate a TOML config string.
pub fn parse_config(content: &str) -> Result<DrillConfig> {
    let config: DrillConfig = toml::from_str(content)?;
    anyhow::ensure!(config.study_goal >= 1, "study_goal must be at least 1");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathdrill"))
}
