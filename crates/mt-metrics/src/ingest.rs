//! Metric ingestion
//!
//! Validates and stamps incoming metrics, appends them to the volatile
//! cache, then attempts a single durable-store insert. The durable outcome
//! is an explicit branch of the result rather than a swallowed exception:
//! ingestion acknowledges on cache durability, so a failed insert is logged
//! and reported back as [`DurableWrite::Failed`] without failing the call.

use std::sync::Arc;

use mt_store::{MetricCache, TableStore};
use mt_types::{AppResult, MetricDraft, MetricRecord};

/// Outcome of the best-effort durable write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurableWrite {
    Persisted,
    Failed(String),
}

/// Result of one accepted ingestion call
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub record: MetricRecord,
    pub durable: DurableWrite,
}

/// Validates, stamps, and dual-writes incoming metrics
pub struct IngestionService {
    cache: Arc<MetricCache>,
    store: Arc<dyn TableStore>,
    table: String,
}

impl IngestionService {
    pub fn new(cache: Arc<MetricCache>, store: Arc<dyn TableStore>, table: impl Into<String>) -> Self {
        Self {
            cache,
            store,
            table: table.into(),
        }
    }

    /// Record one metric observation.
    ///
    /// Validation failures reject synchronously before any write. Once
    /// validated, the record is always appended to the cache; the durable
    /// insert gets exactly one attempt and its failure never fails the call.
    pub async fn record(&self, draft: MetricDraft) -> AppResult<Ingestion> {
        let record = draft.into_record()?;

        self.cache.append(record.clone());

        let row = serde_json::to_value(&record)?;
        let durable = match self.store.insert(&self.table, row).await {
            Ok(()) => DurableWrite::Persisted,
            Err(e) => {
                tracing::warn!(
                    "Durable insert failed for metric '{}' from '{}' (id {}): {}",
                    record.name,
                    record.source,
                    record.id,
                    e
                );
                DurableWrite::Failed(e.to_string())
            }
        };

        Ok(Ingestion { record, durable })
    }

    /// The volatile cache this service appends to
    pub fn cache(&self) -> &Arc<MetricCache> {
        &self.cache
    }
}
