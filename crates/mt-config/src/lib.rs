//! Configuration for MCP Tracker
//!
//! Loads `config.yaml` from the config directory and applies environment
//! variable overrides on top. A missing file is not an error (defaults plus
//! environment are enough to run against a local store); a malformed file is.

pub mod paths;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use mt_types::{AppError, AppResult};

/// One log file exposed by the log-reader resource server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogFileConfig {
    /// Resource URI presented to clients (e.g. "file:///var/log/app.log")
    pub uri: String,

    /// Human-readable resource name
    pub name: String,

    /// Optional one-line description shown to clients
    #[serde(default)]
    pub description: Option<String>,

    /// Filesystem path the URI resolves to
    pub path: PathBuf,

    /// Listed even when the file does not exist yet (development fallback)
    #[serde(default)]
    pub always_listed: bool,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the durable store (PostgREST-style endpoint)
    pub store_url: String,

    /// API key for the durable store
    pub store_api_key: String,

    /// Table metrics are persisted to
    pub metrics_table: String,

    /// Result ceiling for unfiltered queries
    pub query_limit: usize,

    /// Timeout for durable store round-trips, in seconds
    pub store_timeout_secs: u64,

    /// Log files served by the log-reader mode
    pub log_files: Vec<LogFileConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            store_api_key: String::new(),
            metrics_table: "metrics".to_string(),
            query_limit: 100,
            store_timeout_secs: 10,
            log_files: vec![
                LogFileConfig {
                    uri: "file:///var/log/app.log".to_string(),
                    name: "Application Logs (Production)".to_string(),
                    description: Some("Main application log file".to_string()),
                    path: PathBuf::from("/var/log/app.log"),
                    always_listed: false,
                },
                LogFileConfig {
                    uri: "file://./app.log".to_string(),
                    name: "Application Logs (Local)".to_string(),
                    description: Some("Local development log file".to_string()),
                    path: PathBuf::from("./app.log"),
                    always_listed: true,
                },
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> AppResult<Self> {
        Self::load_from_path(paths::config_file()?)
    }

    /// Load configuration from an explicit path
    ///
    /// A missing file yields defaults; environment overrides are applied in
    /// both cases.
    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            serde_yaml::from_str(&raw).map_err(|e| {
                AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `MCP_TRACKER_*` environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MCP_TRACKER_STORE_URL") {
            self.store_url = url;
        }
        if let Ok(key) = std::env::var("MCP_TRACKER_STORE_KEY") {
            self.store_api_key = key;
        }
        if let Ok(table) = std::env::var("MCP_TRACKER_TABLE") {
            self.metrics_table = table;
        }
        if let Ok(limit) = std::env::var("MCP_TRACKER_QUERY_LIMIT") {
            match limit.parse() {
                Ok(parsed) => self.query_limit = parsed,
                Err(_) => tracing::warn!(
                    "Ignoring non-numeric MCP_TRACKER_QUERY_LIMIT: '{}'",
                    limit
                ),
            }
        }
    }

    /// Durable store configuration is present
    pub fn has_store(&self) -> bool {
        !self.store_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        std::env::remove_var("MCP_TRACKER_STORE_URL");
        std::env::remove_var("MCP_TRACKER_STORE_KEY");
        std::env::remove_var("MCP_TRACKER_TABLE");
        std::env::remove_var("MCP_TRACKER_QUERY_LIMIT");
    }

    #[test]
    #[serial]
    fn test_missing_file_yields_defaults() {
        clear_env();
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from_path(dir.path().join("config.yaml")).unwrap();

        assert_eq!(config.metrics_table, "metrics");
        assert_eq!(config.query_limit, 100);
        assert_eq!(config.store_timeout_secs, 10);
        assert!(!config.has_store());
        assert_eq!(config.log_files.len(), 2);
    }

    #[test]
    #[serial]
    fn test_load_yaml_file() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "store_url: https://example.supabase.co\nstore_api_key: secret\nquery_limit: 25\n",
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.store_url, "https://example.supabase.co");
        assert_eq!(config.store_api_key, "secret");
        assert_eq!(config.query_limit, 25);
        // Unspecified fields keep their defaults
        assert_eq!(config.metrics_table, "metrics");
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_an_error() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "store_url: [unclosed").unwrap();

        let result = AppConfig::load_from_path(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "store_url: https://from-file.example\n").unwrap();

        std::env::set_var("MCP_TRACKER_STORE_URL", "https://from-env.example");
        std::env::set_var("MCP_TRACKER_TABLE", "metrics_v2");
        let config = AppConfig::load_from_path(&path).unwrap();
        clear_env();

        assert_eq!(config.store_url, "https://from-env.example");
        assert_eq!(config.metrics_table, "metrics_v2");
    }

    #[test]
    #[serial]
    fn test_bad_query_limit_env_is_ignored() {
        clear_env();
        std::env::set_var("MCP_TRACKER_QUERY_LIMIT", "lots");
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from_path(dir.path().join("config.yaml")).unwrap();
        clear_env();

        assert_eq!(config.query_limit, 100);
    }
}
