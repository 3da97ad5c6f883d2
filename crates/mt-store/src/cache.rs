//! Volatile metric cache
//!
//! Append-only, process-lifetime record list. Ingestion appends here
//! unconditionally before attempting the durable write, so an acknowledged
//! record is always present even when the durable tier is degraded. Not
//! authoritative; lost on process exit.

use parking_lot::Mutex;

use mt_types::MetricRecord;

/// Concurrency-safe append-only record cache
#[derive(Default)]
pub struct MetricCache {
    records: Mutex<Vec<MetricRecord>>,
}

impl MetricCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Never fails and never rejects.
    pub fn append(&self, record: MetricRecord) {
        self.records.lock().push(record);
    }

    /// Clone the current contents
    pub fn snapshot(&self) -> Vec<MetricRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Arc;
    use uuid::Uuid;

    fn record(name: &str, value: f64) -> MetricRecord {
        MetricRecord {
            id: Uuid::new_v4(),
            source: "test".to_string(),
            name: name.to_string(),
            value,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_append_and_snapshot() {
        let cache = MetricCache::new();
        assert!(cache.is_empty());

        cache.append(record("temperature", 72.5));
        cache.append(record("wind", 5.0));

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "temperature");
        assert_eq!(snapshot[1].name, "wind");
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let cache = Arc::new(MetricCache::new());
        let mut handles = Vec::new();

        for t in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    cache.append(record(&format!("metric-{}-{}", t, i), i as f64));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 800);

        // No record duplicated
        let ids: HashSet<Uuid> = snapshot.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 800);
    }
}
