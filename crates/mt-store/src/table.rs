//! Durable store boundary
//!
//! The core depends on exactly two operations plus equality-filter
//! composition; everything else about the backend (connection lifecycle,
//! schema, auth) stays behind this trait.

use async_trait::async_trait;
use serde_json::Value;

use mt_types::AppResult;

/// Exact-match equality filter on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Remote tabular store offering insert and filtered select
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert one row. A single attempt; the caller decides whether failure
    /// is fatal.
    async fn insert(&self, table: &str, row: Value) -> AppResult<()>;

    /// Select rows matching all filters, capped at `limit` most recent.
    async fn select(&self, table: &str, filters: &[Filter], limit: usize) -> AppResult<Vec<Value>>;
}
