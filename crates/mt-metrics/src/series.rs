//! Series transform
//!
//! Groups records by metric name into chronologically ordered (x, y) pairs
//! for charting. Pure: no side effects, input untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use mt_types::MetricRecord;

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
}

/// Group records by metric name into ordered series.
///
/// Points are sorted ascending by timestamp, with value as the tie-break so
/// any permutation of the same input produces identical output. Empty input
/// yields an empty map.
pub fn to_series(records: &[MetricRecord]) -> BTreeMap<String, Vec<SeriesPoint>> {
    let mut series: BTreeMap<String, Vec<SeriesPoint>> = BTreeMap::new();

    for record in records {
        series.entry(record.name.clone()).or_default().push(SeriesPoint {
            x: record.timestamp,
            y: record.value,
        });
    }

    for points in series.values_mut() {
        points.sort_by(|a, b| {
            a.x.cmp(&b.x)
                .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
        });
    }

    series
}
