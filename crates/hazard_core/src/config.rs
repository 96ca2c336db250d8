//! Store configuration.
//!
//! # Responsibility
//! - Describe where the database lives and how the process logs.
//! - Provide defaults matching the historical `hazards.db` layout.
//!
//! # Invariants
//! - `db_path` is never empty once `validate()` passed.
//! - `log_level` is one of `trace|debug|info|warn|error` once validated.

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Database file used when no locator is configured.
pub const DEFAULT_DB_FILE: &str = "hazards.db";
/// How long SQLite waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Settings used to open a [`crate::HazardStore`] and its logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub busy_timeout_ms: u64,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Creates a config pointing at `db_path` with all other fields defaulted.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    /// Checks field-level constraints.
    ///
    /// # Errors
    /// - `ConfigError::EmptyDbPath` when `db_path` is blank.
    /// - `ConfigError::InvalidLogLevel` when `log_level` is unknown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "db_path must not be empty"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_FILE};
    use std::path::PathBuf;

    #[test]
    fn default_points_at_hazards_db() {
        let config = StoreConfig::default();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert!(config.log_dir.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_blank_db_path() {
        let config = StoreConfig::with_db_path("   ");
        assert_eq!(config.validate().unwrap_err(), ConfigError::EmptyDbPath);
    }

    #[test]
    fn validate_rejects_unknown_level() {
        let config = StoreConfig {
            log_level: "loud".to_string(),
            ..StoreConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(message) if message.contains("loud")));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "db_path": "/tmp/trail.db", "log_level": "warn" }"#)
                .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/trail.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
    }
}
