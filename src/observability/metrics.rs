//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe; batches validated in parallel share one registry

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Validation counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Records run through the validator
    records_validated: AtomicU64,
    /// Records that produced a normalized record
    records_accepted: AtomicU64,
    /// Records with at least one field error
    records_rejected: AtomicU64,
    /// Field errors across all rejected records
    field_errors: AtomicU64,
    /// Field values rewritten by normalization
    fields_normalized: AtomicU64,
    /// Batches completed
    batches: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.records_validated.fetch_add(1, Ordering::Relaxed);
        self.records_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self, field_errors: usize) {
        self.records_validated.fetch_add(1, Ordering::Relaxed);
        self.records_rejected.fetch_add(1, Ordering::Relaxed);
        self.field_errors.fetch_add(field_errors as u64, Ordering::Relaxed);
    }

    pub fn add_normalized(&self, fields: usize) {
        self.fields_normalized.fetch_add(fields as u64, Ordering::Relaxed);
    }

    pub fn increment_batches(&self) {
        self.batches.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_validated: self.records_validated.load(Ordering::Relaxed),
            records_accepted: self.records_accepted.load(Ordering::Relaxed),
            records_rejected: self.records_rejected.load(Ordering::Relaxed),
            field_errors: self.field_errors.load(Ordering::Relaxed),
            fields_normalized: self.fields_normalized.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_validated: u64,
    pub records_accepted: u64,
    pub records_rejected: u64,
    pub field_errors: u64,
    pub fields_normalized: u64,
    pub batches: u64,
}
