//! Scoring configuration for the CLI.
//!
//! A config file looks like:
//!
//! ```toml
//! preset = "speed-focused"
//!
//! [scoring]
//! time_weight = 0.4
//! difficulty_weight = 0.4
//! accuracy_weight = 0.2
//! ```
//!
//! An explicit `[scoring]` table wins over `preset`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use testscore_core::config::{ScoringConfig, ScoringPreset};

/// File name searched for in the current directory.
pub const LOCAL_CONFIG: &str = "testscore.toml";

#[derive(Debug, Default, Deserialize)]
pub struct TestscoreConfig {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub scoring: Option<TomlScoring>,
}

#[derive(Debug, Deserialize)]
pub struct TomlScoring {
    pub time_weight: f64,
    pub difficulty_weight: f64,
    pub accuracy_weight: f64,
}

impl TestscoreConfig {
    /// The scoring config this file selects, if any.
    pub fn scoring_config(&self) -> Result<Option<ScoringConfig>> {
        if let Some(s) = &self.scoring {
            return Ok(Some(ScoringConfig::new(
                s.time_weight,
                s.difficulty_weight,
                s.accuracy_weight,
            )));
        }
        self.preset
            .as_deref()
            .map(|p| p.parse::<ScoringPreset>().map(ScoringPreset::config))
            .transpose()
            .map_err(Into::into)
    }
}

/// Parse a config file's contents.
pub fn parse_config_str(content: &str, source: &Path) -> Result<TestscoreConfig> {
    toml::from_str(content).with_context(|| format!("failed to parse config: {}", source.display()))
}

/// Load config from an explicit path, or `testscore.toml` in the current
/// directory. Returns the default (empty) config when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<TestscoreConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(LOCAL_CONFIG)).filter(|p| p.exists()),
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content, &path)
        }
        None => Ok(TestscoreConfig::default()),
    }
}

/// Resolve the scoring config override: `--config` file, then `--preset`,
/// then a local `testscore.toml`. `None` means "use the session's own".
pub fn resolve_scoring(
    config_path: Option<&Path>,
    preset: Option<&str>,
) -> Result<Option<ScoringConfig>> {
    if let Some(path) = config_path {
        return load_config_from(Some(path))?.scoring_config();
    }
    if let Some(name) = preset {
        return Ok(Some(name.parse::<ScoringPreset>()?.config()));
    }
    load_config_from(None)?.scoring_config()
}
