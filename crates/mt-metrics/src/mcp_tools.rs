//! MCP tool definitions for metrics
//!
//! Binds the ingestion, query, series, and chart services to named callable
//! tools with declared argument schemas. The protocol framework owns all
//! wire encoding; handlers take parsed JSON arguments and return plain JSON
//! values.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use mt_mcp::{McpServer, McpTool, ToolHandler};
use mt_types::{AppError, AppResult, MetricDraft};

use crate::chart::compose_chart;
use crate::ingest::IngestionService;
use crate::query::{MetricFilter, QueryService};
use crate::series::to_series;

fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> AppResult<T> {
    serde_json::from_value(args)
        .map_err(|e| AppError::InvalidParams(format!("Invalid arguments: {}", e)))
}

#[derive(Debug, Deserialize)]
struct FilterArgs {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<FilterArgs> for MetricFilter {
    fn from(args: FilterArgs) -> Self {
        MetricFilter {
            source: args.source,
            name: args.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartArgs {
    name: String,
    #[serde(default)]
    source: Option<String>,
}

/// `record_metric`: validate, stamp, and dual-write one observation
pub struct RecordMetricTool {
    ingestion: Arc<IngestionService>,
}

#[async_trait]
impl ToolHandler for RecordMetricTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "record_metric".to_string(),
            description: Some("Record a numeric metric emitted by a server process".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "source": {
                        "type": "string",
                        "description": "Identifier of the emitting process"
                    },
                    "name": {
                        "type": "string",
                        "description": "Label of the measured quantity (e.g., 'cpu_usage')"
                    },
                    "value": {
                        "type": "number",
                        "description": "Observed value"
                    },
                    "timestamp": {
                        "type": "string",
                        "description": "ISO-8601 instant; current UTC time is used if omitted"
                    }
                },
                "required": ["source", "name", "value"],
                "additionalProperties": false
            }),
        }
    }

    async fn call(&self, args: Value) -> AppResult<Value> {
        let draft: MetricDraft = parse_args(args)?;
        let ingestion = self.ingestion.record(draft).await?;

        // Durable-write failure was already absorbed and logged; the caller
        // is acknowledged on cache durability either way.
        Ok(json!(format!(
            "Metric '{}' recorded from '{}' (id {}).",
            ingestion.record.name, ingestion.record.source, ingestion.record.id
        )))
    }
}

/// `get_metrics`: retrieve records with optional equality filters
pub struct GetMetricsTool {
    query: Arc<QueryService>,
}

#[async_trait]
impl ToolHandler for GetMetricsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_metrics".to_string(),
            description: Some(
                "Retrieve recorded metrics, optionally filtered by source and/or name".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "source": {
                        "type": "string",
                        "description": "Exact-match filter on the emitting process"
                    },
                    "name": {
                        "type": "string",
                        "description": "Exact-match filter on the metric name"
                    }
                },
                "additionalProperties": false
            }),
        }
    }

    async fn call(&self, args: Value) -> AppResult<Value> {
        let filter: MetricFilter = parse_args::<FilterArgs>(args)?.into();
        let records = self.query.query(&filter).await?;
        Ok(serde_json::to_value(records)?)
    }
}

/// `get_metric_series`: filtered records reshaped into chart series
pub struct GetMetricSeriesTool {
    query: Arc<QueryService>,
}

#[async_trait]
impl ToolHandler for GetMetricSeriesTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_metric_series".to_string(),
            description: Some(
                "Retrieve metrics grouped by name into chronologically ordered {x, y} series"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "source": {
                        "type": "string",
                        "description": "Exact-match filter on the emitting process"
                    },
                    "name": {
                        "type": "string",
                        "description": "Exact-match filter on the metric name"
                    }
                },
                "additionalProperties": false
            }),
        }
    }

    async fn call(&self, args: Value) -> AppResult<Value> {
        let filter: MetricFilter = parse_args::<FilterArgs>(args)?.into();
        let records = self.query.query(&filter).await?;
        Ok(serde_json::to_value(to_series(&records))?)
    }
}

/// `get_metric_chart`: one metric's series composed into a chart payload
pub struct GetMetricChartTool {
    query: Arc<QueryService>,
}

#[async_trait]
impl ToolHandler for GetMetricChartTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_metric_chart".to_string(),
            description: Some(
                "Compose a chart payload (display metadata, current/min/max/mean, ordered points) for one metric"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Metric name to chart"
                    },
                    "source": {
                        "type": "string",
                        "description": "Exact-match filter on the emitting process"
                    }
                },
                "required": ["name"],
                "additionalProperties": false
            }),
        }
    }

    async fn call(&self, args: Value) -> AppResult<Value> {
        let args: ChartArgs = parse_args(args)?;
        let filter = MetricFilter {
            source: args.source,
            name: Some(args.name.clone()),
        };

        let records = self.query.query(&filter).await?;
        let series = to_series(&records);
        let points = series.get(&args.name).map(Vec::as_slice).unwrap_or(&[]);

        let payload = compose_chart(&args.name, points)?;
        Ok(serde_json::to_value(payload)?)
    }
}

/// `healthcheck`: liveness probe
pub struct HealthcheckTool;

#[async_trait]
impl ToolHandler for HealthcheckTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "healthcheck".to_string(),
            description: Some("Check that the tracker server is up".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        }
    }

    async fn call(&self, _args: Value) -> AppResult<Value> {
        Ok(json!("MCP Tracker server is up"))
    }
}

/// Register every metrics tool on a server
pub fn register_metric_tools(
    server: &mut McpServer,
    ingestion: Arc<IngestionService>,
    query: Arc<QueryService>,
) {
    server.register_tool(Arc::new(RecordMetricTool { ingestion }));
    server.register_tool(Arc::new(GetMetricsTool {
        query: query.clone(),
    }));
    server.register_tool(Arc::new(GetMetricSeriesTool {
        query: query.clone(),
    }));
    server.register_tool(Arc::new(GetMetricChartTool { query }));
    server.register_tool(Arc::new(HealthcheckTool));
}
