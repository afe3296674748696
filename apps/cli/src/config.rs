//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. There are no command-line flags.
//!
//! | Variable                          | Default        |
//! |-----------------------------------|----------------|
//! | `STOCKROOM_DB_PATH`               | `inventory.db` |
//! | `STOCKROOM_CASE_SENSITIVE_SEARCH` | `false`        |
//! | `STOCKROOM_CONNECT_TIMEOUT_SECS`  | `30`           |
//!
//! Log verbosity follows `RUST_LOG` (see `init_tracing` in `main.rs`).

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use stockroom_core::DEFAULT_DATABASE_FILE;
use stockroom_db::DbConfig;

pub const DB_PATH_VAR: &str = "STOCKROOM_DB_PATH";
pub const CASE_SENSITIVE_SEARCH_VAR: &str = "STOCKROOM_CASE_SENSITIVE_SEARCH";
pub const CONNECT_TIMEOUT_VAR: &str = "STOCKROOM_CONNECT_TIMEOUT_SECS";

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Database file
    pub database_path: PathBuf,

    /// Match name searches byte-for-byte
    pub case_sensitive_search: bool,

    /// How long to wait for the database handle
    pub connect_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            case_sensitive_search: false,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an explicit variable map (for tests).
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let database_path = match lookup(DB_PATH_VAR) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(DB_PATH_VAR.to_string()))
            }
            Some(path) => PathBuf::from(path),
            None => defaults.database_path,
        };

        let case_sensitive_search = match lookup(CASE_SENSITIVE_SEARCH_VAR) {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| ConfigError::InvalidValue(CASE_SENSITIVE_SEARCH_VAR.to_string()))?,
            None => defaults.case_sensitive_search,
        };

        let connect_timeout = match lookup(CONNECT_TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue(CONNECT_TIMEOUT_VAR.to_string()))?,
            None => defaults.connect_timeout,
        };

        Ok(AppConfig {
            database_path,
            case_sensitive_search,
            connect_timeout,
        })
    }

    /// Builds the database configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .connect_timeout(self.connect_timeout)
            .case_sensitive_search(self.case_sensitive_search)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_map(&HashMap::new()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database_path, PathBuf::from("inventory.db"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_map(&vars(&[
            (DB_PATH_VAR, "/tmp/shop.db"),
            (CASE_SENSITIVE_SEARCH_VAR, "TRUE"),
            (CONNECT_TIMEOUT_VAR, " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert!(config.case_sensitive_search);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));

        let db_config = config.db_config();
        assert_eq!(db_config.database_path, PathBuf::from("/tmp/shop.db"));
        assert!(db_config.case_sensitive_search);
        assert!(db_config.ensure_schema);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AppConfig::from_map(&vars(&[(CASE_SENSITIVE_SEARCH_VAR, "maybe")])),
            Err(ConfigError::InvalidValue(CASE_SENSITIVE_SEARCH_VAR.to_string()))
        );
        assert_eq!(
            AppConfig::from_map(&vars(&[(CONNECT_TIMEOUT_VAR, "-1")])),
            Err(ConfigError::InvalidValue(CONNECT_TIMEOUT_VAR.to_string()))
        );
        assert_eq!(
            AppConfig::from_map(&vars(&[(DB_PATH_VAR, "  ")])),
            Err(ConfigError::InvalidValue(DB_PATH_VAR.to_string()))
        );
    }
}
