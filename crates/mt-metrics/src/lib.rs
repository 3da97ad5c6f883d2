//! Metrics core for MCP Tracker
//!
//! Ingestion (validate, stamp, dual-write), querying (equality filters
//! against the durable store), the series transform that shapes records for
//! charting, and the chart composer that adds display metadata and
//! aggregates. `mcp_tools` binds all of it to the MCP tool boundary.

pub mod chart;
pub mod ingest;
pub mod mcp_tools;
pub mod query;
pub mod series;

pub use chart::{compose_chart, display_for, ChartPayload, MetricDisplay};
pub use ingest::{DurableWrite, Ingestion, IngestionService};
pub use mcp_tools::register_metric_tools;
pub use query::{MetricFilter, QueryService};
pub use series::{to_series, SeriesPoint};
