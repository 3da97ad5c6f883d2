//! MCP Tracker
//!
//! Serves metrics tools (record, query, series, chart) over MCP on stdio.
//! Alternate modes serve the log-file resource server or a one-shot
//! dashboard dump of the durable store.

pub mod cli;
pub mod dashboard;
pub mod log_resources;
