use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcp_tracker::cli::Cli;
use mcp_tracker::dashboard;
use mcp_tracker::log_resources::LogResourceProvider;
use mt_config::AppConfig;
use mt_metrics::{register_metric_tools, IngestionService, MetricFilter, QueryService};
use mt_store::{MemoryTableStore, MetricCache, RestTableStore, TableStore};

const SERVER_NAME: &str = "mcp-tracker";
const LOG_READER_NAME: &str = "log-reader-server";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON-RPC only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_args();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    if cli.log_reader {
        return serve_log_reader(config).await;
    }

    let store = build_store(&config)?;
    let query = Arc::new(QueryService::new(
        store.clone(),
        config.metrics_table.clone(),
        config.query_limit,
    ));

    if cli.dashboard {
        let filter = MetricFilter {
            source: cli.source,
            name: cli.metric,
        };
        let view = dashboard::build_view(&query, &filter).await?;
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let cache = Arc::new(MetricCache::new());
    let ingestion = Arc::new(IngestionService::new(
        cache,
        store,
        config.metrics_table.clone(),
    ));

    let mut server = mt_mcp::McpServer::new(SERVER_NAME, env!("CARGO_PKG_VERSION"));
    register_metric_tools(&mut server, ingestion, query);

    info!("Starting metrics MCP server on stdio...");
    mt_mcp::StdioServer::new(Arc::new(server)).run().await?;

    Ok(())
}

/// Pick the durable store backend from configuration
fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn TableStore>> {
    if config.has_store() {
        info!("Using durable store at {}", config.store_url);
        let store = RestTableStore::new(
            config.store_url.clone(),
            config.store_api_key.clone(),
            std::time::Duration::from_secs(config.store_timeout_secs),
        )?;
        Ok(Arc::new(store))
    } else {
        warn!("No durable store configured; metrics will not survive this process");
        Ok(Arc::new(MemoryTableStore::new()))
    }
}

/// Serve the log-file resource server on stdio
async fn serve_log_reader(config: AppConfig) -> anyhow::Result<()> {
    let provider = Arc::new(LogResourceProvider::new(config.log_files));

    let mut server = mt_mcp::McpServer::new(LOG_READER_NAME, env!("CARGO_PKG_VERSION"));
    server.set_resources(provider);

    info!("Starting log-reader MCP server on stdio...");
    mt_mcp::StdioServer::new(Arc::new(server)).run().await?;

    Ok(())
}
