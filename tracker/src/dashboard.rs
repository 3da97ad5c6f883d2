//! Dashboard view construction
//!
//! Queries the durable store and assembles everything an interactive
//! front end needs for one render: the filtered records, the distinct
//! source/metric lists that drive filter widgets, and one composed chart
//! payload per metric. Rendering itself stays outside this process; the
//! view is emitted as JSON.

use serde::Serialize;
use std::collections::BTreeSet;

use mt_metrics::{compose_chart, to_series, ChartPayload, MetricFilter, QueryService};
use mt_types::{AppResult, MetricRecord};

/// One renderable dashboard snapshot
#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// Records matching the active filter
    pub records: Vec<MetricRecord>,

    /// Distinct emitting processes across the result set
    pub sources: Vec<String>,

    /// Distinct metric names across the result set
    pub metrics: Vec<String>,

    /// One chart per metric present in the result set
    pub charts: Vec<ChartPayload>,
}

/// Query the store once and compose the dashboard view
pub async fn build_view(query: &QueryService, filter: &MetricFilter) -> AppResult<DashboardView> {
    let records = query.query(filter).await?;

    let sources: Vec<String> = records
        .iter()
        .map(|r| r.source.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let metrics: Vec<String> = records
        .iter()
        .map(|r| r.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // Every group produced by the transform has at least one point, so
    // composition cannot hit the empty-series guard here.
    let series = to_series(&records);
    let charts = series
        .iter()
        .map(|(name, points)| compose_chart(name, points))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(DashboardView {
        records,
        sources,
        metrics,
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_store::{MemoryTableStore, TableStore};
    use serde_json::json;
    use std::sync::Arc;

    async fn seeded_query() -> QueryService {
        let store = Arc::new(MemoryTableStore::new());
        let rows = [
            ("weather", "temperature", 72.5, "2024-05-24T10:00:00Z"),
            ("weather", "temperature", 75.0, "2024-05-24T11:00:00Z"),
            ("weather", "wind", 5.0, "2024-05-24T10:30:00Z"),
            ("api", "latency", 120.0, "2024-05-24T10:15:00Z"),
        ];
        for (i, (source, name, value, timestamp)) in rows.iter().enumerate() {
            store
                .insert(
                    "metrics",
                    json!({
                        "id": format!("00000000-0000-0000-0000-00000000000{}", i),
                        "source": source,
                        "name": name,
                        "value": value,
                        "timestamp": timestamp,
                    }),
                )
                .await
                .unwrap();
        }
        QueryService::new(store, "metrics", 100)
    }

    #[tokio::test]
    async fn test_unfiltered_view() {
        let query = seeded_query().await;
        let view = build_view(&query, &MetricFilter::none()).await.unwrap();

        assert_eq!(view.records.len(), 4);
        assert_eq!(view.sources, vec!["api", "weather"]);
        assert_eq!(view.metrics, vec!["latency", "temperature", "wind"]);
        assert_eq!(view.charts.len(), 3);

        let temperature = view
            .charts
            .iter()
            .find(|c| c.metric == "temperature")
            .unwrap();
        assert_eq!(temperature.current, 75.0);
        assert_eq!(temperature.points.len(), 2);
    }

    #[tokio::test]
    async fn test_filtered_view() {
        let query = seeded_query().await;
        let view = build_view(
            &query,
            &MetricFilter {
                source: Some("weather".to_string()),
                name: Some("temperature".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(view.records.len(), 2);
        assert_eq!(view.sources, vec!["weather"]);
        assert_eq!(view.metrics, vec!["temperature"]);
        assert_eq!(view.charts.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_view() {
        let query = QueryService::new(Arc::new(MemoryTableStore::new()), "metrics", 100);
        let view = build_view(&query, &MetricFilter::none()).await.unwrap();

        assert!(view.records.is_empty());
        assert!(view.sources.is_empty());
        assert!(view.metrics.is_empty());
        assert!(view.charts.is_empty());
    }

    #[tokio::test]
    async fn test_view_serializes_to_json() {
        let query = seeded_query().await;
        let view = build_view(&query, &MetricFilter::none()).await.unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["records"].is_array());
        assert!(json["charts"][0]["display"]["label"].is_string());
    }
}
