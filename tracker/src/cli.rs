//! CLI argument parsing for MCP Tracker
//!
//! Supports three modes:
//! - Metrics mode (default): MCP metrics server over stdio
//! - Log-reader mode (--log-reader): MCP log-file resource server over stdio
//! - Dashboard mode (--dashboard): one-shot filtered dashboard dump as JSON

use clap::Parser;
use std::path::PathBuf;

/// MCP Tracker - record, query, and chart-shape metrics from server processes
#[derive(Parser, Debug)]
#[command(name = "mcp-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Serve the log-file resource server instead of the metrics tools
    ///
    /// Exposes the configured application log files as read-only MCP
    /// resources (resources/list, resources/read) over stdio.
    #[arg(long, conflicts_with = "dashboard")]
    pub log_reader: bool,

    /// Query the durable store once, print a dashboard view as JSON, and exit
    ///
    /// The view contains the filtered records, the distinct source and
    /// metric name lists, and one chart payload per metric. Rendering is
    /// left to whatever consumes the JSON.
    #[arg(long)]
    pub dashboard: bool,

    /// Filter the dashboard by emitting process
    #[arg(long, requires = "dashboard")]
    pub source: Option<String>,

    /// Filter the dashboard by metric name
    #[arg(long, requires = "dashboard")]
    pub metric: Option<String>,

    /// Use an explicit config file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_mode() {
        let cli = Cli::try_parse_from(["mcp-tracker"]).unwrap();
        assert!(!cli.log_reader);
        assert!(!cli.dashboard);
        assert!(cli.source.is_none());
        assert!(cli.metric.is_none());
    }

    #[test]
    fn test_cli_log_reader_mode() {
        let cli = Cli::try_parse_from(["mcp-tracker", "--log-reader"]).unwrap();
        assert!(cli.log_reader);
    }

    #[test]
    fn test_cli_dashboard_with_filters() {
        let cli = Cli::try_parse_from([
            "mcp-tracker",
            "--dashboard",
            "--source",
            "weather",
            "--metric",
            "temperature",
        ])
        .unwrap();
        assert!(cli.dashboard);
        assert_eq!(cli.source, Some("weather".to_string()));
        assert_eq!(cli.metric, Some("temperature".to_string()));
    }

    #[test]
    fn test_cli_filters_require_dashboard_mode() {
        let cli = Cli::try_parse_from(["mcp-tracker", "--source", "weather"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_log_reader_conflicts_with_dashboard() {
        let cli = Cli::try_parse_from(["mcp-tracker", "--log-reader", "--dashboard"]);
        assert!(cli.is_err());
    }
}
