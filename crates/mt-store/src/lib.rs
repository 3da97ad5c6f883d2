//! Storage layer for MCP Tracker
//!
//! Two tiers: a remote durable store reached through the [`TableStore`]
//! boundary (one attempt per call, no retries), and a process-lifetime
//! volatile [`MetricCache`] that ingestion appends to unconditionally.
//! The durable store is authoritative when reachable; the cache is not.

pub mod cache;
pub mod memory;
pub mod rest;
pub mod table;

pub use cache::MetricCache;
pub use memory::MemoryTableStore;
pub use rest::RestTableStore;
pub use table::{Filter, TableStore};
