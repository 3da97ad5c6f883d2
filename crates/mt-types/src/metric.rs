//! Metric record model and ingestion validation
//!
//! A `MetricRecord` is one observation from an emitting process. Records are
//! created exclusively at ingestion time and are immutable afterwards;
//! corrections are expressed as new records.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// One persisted metric observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Unique identifier, assigned at ingestion (never caller-supplied)
    pub id: Uuid,

    /// Emitting process identifier
    pub source: String,

    /// Label of the measured quantity
    pub name: String,

    /// Observed value
    pub value: f64,

    /// Instant of observation (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Unvalidated ingestion input, as received from the tool boundary
#[derive(Debug, Clone, Deserialize)]
pub struct MetricDraft {
    pub source: String,
    pub name: String,
    pub value: f64,

    /// Optional ISO-8601 instant; current UTC time is assigned when absent
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl MetricDraft {
    /// Validate the draft and mint a record with a fresh id.
    ///
    /// Rejects before any write happens: empty `source` or `name`, a
    /// non-finite `value`, or an unparseable `timestamp` all fail with
    /// [`AppError::Validation`].
    pub fn into_record(self) -> AppResult<MetricRecord> {
        if self.source.trim().is_empty() {
            return Err(AppError::Validation(
                "'source' must be a non-empty string".to_string(),
            ));
        }

        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "'name' must be a non-empty string".to_string(),
            ));
        }

        if !self.value.is_finite() {
            return Err(AppError::Validation(format!(
                "'value' must be a finite number, got {}",
                self.value
            )));
        }

        let timestamp = match self.timestamp.as_deref() {
            Some(raw) => parse_iso8601(raw)?,
            None => Utc::now(),
        };

        Ok(MetricRecord {
            id: Uuid::new_v4(),
            source: self.source,
            name: self.name,
            value: self.value,
            timestamp,
        })
    }
}

/// Parse an ISO-8601 instant.
///
/// Accepts RFC 3339 ("2024-05-24T10:00:01Z", with offset) and the naive
/// form emitters commonly produce ("2024-05-24T10:00:01.123456", no offset),
/// which is interpreted as UTC.
pub fn parse_iso8601(raw: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(AppError::Validation(format!(
        "'timestamp' is not a valid ISO-8601 instant: '{}'",
        raw
    )))
}
