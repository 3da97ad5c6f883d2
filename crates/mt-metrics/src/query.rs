//! Metric querying
//!
//! Retrieves records from the durable store with optional exact-match
//! filters. A store failure surfaces as `BackendUnavailable` rather than an
//! empty result, so "no matching rows" and "could not ask" stay
//! distinguishable downstream. No cache fallback.

use std::sync::Arc;

use mt_store::{Filter, TableStore};
use mt_types::{AppError, AppResult, MetricRecord};

/// Optional exact-match filters on source and metric name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFilter {
    pub source: Option<String>,
    pub name: Option<String>,
}

impl MetricFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn describe(&self) -> String {
        match (&self.source, &self.name) {
            (Some(source), Some(name)) => format!("source='{}' name='{}'", source, name),
            (Some(source), None) => format!("source='{}'", source),
            (None, Some(name)) => format!("name='{}'", name),
            (None, None) => "unfiltered".to_string(),
        }
    }
}

/// Reads records back from the durable store
pub struct QueryService {
    store: Arc<dyn TableStore>,
    table: String,
    limit: usize,
}

impl QueryService {
    pub fn new(store: Arc<dyn TableStore>, table: impl Into<String>, limit: usize) -> Self {
        Self {
            store,
            table: table.into(),
            limit,
        }
    }

    /// Fetch records matching the filter, capped at the configured limit.
    ///
    /// No ordering guarantee; chronological ordering belongs to the series
    /// transform. Rows that do not deserialize as records are logged and
    /// skipped.
    pub async fn query(&self, filter: &MetricFilter) -> AppResult<Vec<MetricRecord>> {
        let mut filters = Vec::new();
        if let Some(source) = &filter.source {
            filters.push(Filter::eq("source", source.clone()));
        }
        if let Some(name) = &filter.name {
            filters.push(Filter::eq("name", name.clone()));
        }

        let rows = self
            .store
            .select(&self.table, &filters, self.limit)
            .await
            .map_err(|e| {
                AppError::BackendUnavailable(format!(
                    "query ({}) against table '{}' failed: {}",
                    filter.describe(),
                    self.table,
                    e
                ))
            })?;

        let records = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<MetricRecord>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed row in '{}': {}", self.table, e);
                    None
                }
            })
            .collect();

        Ok(records)
    }
}
