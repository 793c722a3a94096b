//! Runtime configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DATABASE_PATH: &str = "medical_camp_data.db";
pub const DEFAULT_ADVISORY_SEPARATOR: &str = " | ";
pub const DEFAULT_LOG_FILTER: &str = "camp_intake_core=info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Intake configuration. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// SQLite file holding the records
    pub database_path: PathBuf,
    /// Separator for the `Health Comments` column
    pub advisory_separator: String,
    /// `tracing` env-filter directive used by `init_logging`
    pub log_filter: String,
    /// Maximum number of fuzzy name suggestions
    pub name_suggestion_limit: usize,
    /// Minimum Jaro-Winkler similarity for a name suggestion
    pub name_suggestion_threshold: f64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            advisory_separator: DEFAULT_ADVISORY_SEPARATOR.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            name_suggestion_limit: 5,
            name_suggestion_threshold: 0.8,
        }
    }
}

impl IntakeConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Filter directive for the log subscriber: `requested` when given, else the
    /// configured `log_filter`.
    pub fn log_directive(&self, requested: &str) -> String {
        let requested = requested.trim();
        if requested.is_empty() {
            self.log_filter.clone()
        } else {
            requested.to_string()
        }
    }

    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
