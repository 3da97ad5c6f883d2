//! OS-specific path resolution for configuration files

use mt_types::{AppError, AppResult};
use std::path::PathBuf;

/// Get the configuration directory
///
/// Priority:
/// 1. Runtime override via `MCP_TRACKER_ENV` environment variable: `~/.mcp-tracker-{env}/`
/// 2. Development mode (debug builds): `~/.mcp-tracker-dev/`
/// 3. Production mode (release builds): `~/.mcp-tracker/`
pub fn config_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("Could not determine home directory".to_string()))?;

    // Runtime override via environment variable (for testing)
    if let Ok(env_suffix) = std::env::var("MCP_TRACKER_ENV") {
        return Ok(home.join(format!(".mcp-tracker-{}", env_suffix)));
    }

    #[cfg(debug_assertions)]
    let dir = home.join(".mcp-tracker-dev");

    #[cfg(not(debug_assertions))]
    let dir = home.join(".mcp-tracker");

    Ok(dir)
}

/// Get the configuration file path
pub fn config_file() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_env_override() {
        std::env::set_var("MCP_TRACKER_ENV", "test");
        let dir = config_dir().unwrap();
        std::env::remove_var("MCP_TRACKER_ENV");

        assert!(dir.ends_with(".mcp-tracker-test"));
    }

    #[test]
    #[serial]
    fn test_config_file_under_config_dir() {
        std::env::remove_var("MCP_TRACKER_ENV");
        let file = config_file().unwrap();
        assert_eq!(file.file_name().unwrap(), "config.yaml");
        assert!(file.starts_with(config_dir().unwrap()));
    }
}
