//! Metrics collection module
//!
//! Counts suggestion pass outcomes, absorbed remote failures, and backend
//! usage.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Process-wide metrics collector
pub fn global() -> &'static Metrics {
    &METRICS
}

/// Counters for the suggestion pipeline and its remote sources
pub struct Metrics {
    passes_issued: AtomicU64,
    passes_committed: AtomicU64,
    passes_superseded: AtomicU64,
    remote_errors: AtomicU64,
    backend_queries: RwLock<HashMap<String, u64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            passes_issued: AtomicU64::new(0),
            passes_committed: AtomicU64::new(0),
            passes_superseded: AtomicU64::new(0),
            remote_errors: AtomicU64::new(0),
            backend_queries: RwLock::new(HashMap::new()),
        }
    }

    pub fn record_pass_issued(&self) {
        self.passes_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pass_committed(&self) {
        self.passes_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pass_superseded(&self) {
        self.passes_superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_remote_error(&self) {
        self.remote_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backend_query(&self, backend: &str) {
        let mut queries = self.backend_queries.write().unwrap();
        *queries.entry(backend.to_string()).or_insert(0) += 1;
    }

    pub fn passes_issued(&self) -> u64 {
        self.passes_issued.load(Ordering::Relaxed)
    }

    pub fn passes_superseded(&self) -> u64 {
        self.passes_superseded.load(Ordering::Relaxed)
    }

    pub fn remote_errors(&self) -> u64 {
        self.remote_errors.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            passes_issued: self.passes_issued.load(Ordering::Relaxed),
            passes_committed: self.passes_committed.load(Ordering::Relaxed),
            passes_superseded: self.passes_superseded.load(Ordering::Relaxed),
            remote_errors: self.remote_errors.load(Ordering::Relaxed),
            backend_queries: self.backend_queries.read().unwrap().clone(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of the collector
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub passes_issued: u64,
    pub passes_committed: u64,
    pub passes_superseded: u64,
    pub remote_errors: u64,
    pub backend_queries: HashMap<String, u64>,
}
