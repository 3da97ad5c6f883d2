//! REST adapter for the remote durable store
//!
//! Speaks the PostgREST dialect: `POST /rest/v1/{table}` to insert,
//! `GET /rest/v1/{table}?column=eq.value&...` to select. Connection-level
//! failures and timeouts surface as `BackendUnavailable`; HTTP-level
//! rejections surface as `Storage`.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use mt_types::{AppError, AppResult};

use crate::table::{Filter, TableStore};

/// Client for a PostgREST-style tabular backend
pub struct RestTableStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestTableStore {
    /// Create a new store client
    ///
    /// `base_url` is the backend root (e.g. "https://xyz.supabase.co");
    /// `timeout` bounds every round-trip so a hung backend cannot block the
    /// serving loop indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Storage(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn classify(&self, e: reqwest::Error, operation: &str) -> AppError {
        if e.is_connect() {
            AppError::BackendUnavailable(format!(
                "{}: could not connect to durable store at {}",
                operation, self.base_url
            ))
        } else if e.is_timeout() {
            AppError::BackendUnavailable(format!("{}: durable store request timed out", operation))
        } else {
            AppError::Storage(format!("{}: {}", operation, e))
        }
    }
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn insert(&self, table: &str, row: Value) -> AppResult<()> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| self.classify(e, "insert"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "insert into '{}' rejected with HTTP {}: {}",
                table, status, body
            )));
        }

        Ok(())
    }

    async fn select(&self, table: &str, filters: &[Filter], limit: usize) -> AppResult<Vec<Value>> {
        let mut query: Vec<(String, String)> = vec![("select".to_string(), "*".to_string())];
        for filter in filters {
            query.push((filter.column.clone(), format!("eq.{}", filter.value)));
        }
        query.push(("order".to_string(), "timestamp.desc".to_string()));
        query.push(("limit".to_string(), limit.to_string()));

        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .query(&query)
            .send()
            .await
            .map_err(|e| self.classify(e, "select"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "select from '{}' rejected with HTTP {}: {}",
                table, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Storage(format!("select from '{}': invalid response body: {}", table, e)))
    }
}
