//! Chart composition
//!
//! Turns one metric's ordered series into a renderable payload: display
//! metadata plus current/min/max/mean aggregates. The payload is a
//! structured contract for a separate rendering component; no markup is
//! produced here.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use mt_types::{AppError, AppResult};

use crate::series::SeriesPoint;

/// Display metadata for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDisplay {
    pub label: String,
    pub unit: String,
    pub symbol: String,
}

/// Known metrics and how to present them
static DISPLAY_CATALOG: Lazy<HashMap<&'static str, (&'static str, &'static str, &'static str)>> =
    Lazy::new(|| {
        HashMap::from([
            ("cpu_usage", ("CPU Usage", "percent", "%")),
            ("memory_usage", ("Memory Usage", "megabytes", "MB")),
            ("disk_usage", ("Disk Usage", "percent", "%")),
            ("latency", ("Latency", "milliseconds", "ms")),
            ("request_count", ("Request Count", "requests", "req")),
            ("error_rate", ("Error Rate", "percent", "%")),
            ("uptime", ("Uptime", "seconds", "s")),
            ("temperature", ("Temperature", "degrees", "°")),
        ])
    });

/// Look up display metadata, falling back to a title-cased label with empty
/// unit and symbol for unknown metrics.
pub fn display_for(name: &str) -> MetricDisplay {
    match DISPLAY_CATALOG.get(name) {
        Some((label, unit, symbol)) => MetricDisplay {
            label: label.to_string(),
            unit: unit.to_string(),
            symbol: symbol.to_string(),
        },
        None => MetricDisplay {
            label: title_case(name),
            unit: String::new(),
            symbol: String::new(),
        },
    }
}

fn title_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renderable chart payload for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub metric: String,
    pub display: MetricDisplay,

    /// Most recent value
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,

    /// Chronologically ordered points
    pub points: Vec<SeriesPoint>,
}

/// Compose the chart payload for one metric's ordered series.
///
/// An empty series is a guarded error: there is no current value to report,
/// and the upstream behavior here is undefined.
pub fn compose_chart(name: &str, points: &[SeriesPoint]) -> AppResult<ChartPayload> {
    let last = points.last().ok_or_else(|| {
        AppError::Validation(format!(
            "cannot compose chart for '{}': series is empty",
            name
        ))
    })?;

    let mut min = f64::MAX;
    let mut max = f64::MIN;
    let mut sum = 0.0;
    for point in points {
        min = min.min(point.y);
        max = max.max(point.y);
        sum += point.y;
    }

    Ok(ChartPayload {
        metric: name.to_string(),
        display: display_for(name),
        current: last.y,
        min,
        max,
        mean: sum / points.len() as f64,
        points: points.to_vec(),
    })
}
