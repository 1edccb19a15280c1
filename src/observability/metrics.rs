//! Metrics registry for hubvault
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe, lock-free (relaxed atomics)

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Operational counters shared by every hub of a registry
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    hubs_created: AtomicU64,
    hubs_removed: AtomicU64,
    documents_created: AtomicU64,
    documents_updated: AtomicU64,
    documents_deleted: AtomicU64,
    writes_rejected: AtomicU64,
    unique_evictions: AtomicU64,
    queries_executed: AtomicU64,
    queries_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_hubs_created(&self) {
        self.hubs_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_hubs_removed(&self) {
        self.hubs_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_documents_created(&self) {
        self.documents_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_documents_updated(&self) {
        self.documents_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_documents_deleted(&self) {
        self.documents_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_rejected(&self) {
        self.writes_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Add evictions reported by one write
    pub fn add_unique_evictions(&self, count: u64) {
        self.unique_evictions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hubs_created: self.hubs_created.load(Ordering::Relaxed),
            hubs_removed: self.hubs_removed.load(Ordering::Relaxed),
            documents_created: self.documents_created.load(Ordering::Relaxed),
            documents_updated: self.documents_updated.load(Ordering::Relaxed),
            documents_deleted: self.documents_deleted.load(Ordering::Relaxed),
            writes_rejected: self.writes_rejected.load(Ordering::Relaxed),
            unique_evictions: self.unique_evictions.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub hubs_created: u64,
    pub hubs_removed: u64,
    pub documents_created: u64,
    pub documents_updated: u64,
    pub documents_deleted: u64,
    pub writes_rejected: u64,
    pub unique_evictions: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
}
