use crate::domain::{ConfigError, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the console façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Entries below this level are dropped before the pipeline runs.
    pub min_level: LogLevel,
    /// Prefix stamped on every entry the façade constructs. Hooks may
    /// overwrite it.
    pub prefix: Option<String>,
    /// Include the entry timestamp in formatted output.
    pub show_timestamp: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            prefix: None,
            show_timestamp: true,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override fields from the environment: `TERMLOG_LEVEL` for
    /// `min_level`, `TERMLOG_PREFIX` for `prefix`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(level) = std::env::var("TERMLOG_LEVEL") {
            self.min_level = level.parse()?;
        }
        if let Ok(prefix) = std::env::var("TERMLOG_PREFIX") {
            self.prefix = Some(prefix);
        }
        Ok(())
    }
}
