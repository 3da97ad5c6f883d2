//! In-memory durable store
//!
//! Implements the [`TableStore`] boundary against process memory. Used by
//! tests and by development runs with no remote backend configured. Mirrors
//! the remote adapter's semantics: equality filters only, result set capped
//! at the most recent `limit` rows by timestamp.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

use mt_types::AppResult;

use crate::table::{Filter, TableStore};

/// Tabular store backed by a per-table row list
#[derive(Default)]
pub struct MemoryTableStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in a table (for tests)
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .get(table)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        row.get(&filter.column)
            .and_then(|v| v.as_str())
            .map(|v| v == filter.value)
            .unwrap_or(false)
    })
}

fn timestamp_of(row: &Value) -> String {
    row.get("timestamp")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn insert(&self, table: &str, row: Value) -> AppResult<()> {
        self.tables
            .lock()
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn select(&self, table: &str, filters: &[Filter], limit: usize) -> AppResult<Vec<Value>> {
        let tables = self.tables.lock();
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches(row, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Most recent first, matching the remote adapter's ordering
        rows.sort_by(|a, b| timestamp_of(b).cmp(&timestamp_of(a)));
        rows.truncate(limit);
        Ok(rows)
    }
}
