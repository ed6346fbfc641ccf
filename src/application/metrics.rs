//! Observability metrics for the validation pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking validation outcomes.
///
/// All counters use atomic operations for thread-safe updates and reads.
/// Clones share the same underlying counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total number of candidates admitted
    admitted: AtomicU64,
    /// Total number of candidates rejected
    rejected: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                admitted: AtomicU64::new(0),
                rejected: AtomicU64::new(0),
            }),
        }
    }

    /// Record an admitted candidate.
    pub(crate) fn record_admitted(&self) {
        self.inner.admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected candidate.
    pub(crate) fn record_rejected(&self) {
        self.inner.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of admitted candidates.
    pub fn admitted(&self) -> u64 {
        self.inner.admitted.load(Ordering::Relaxed)
    }

    /// Get the total number of rejected candidates.
    pub fn rejected(&self) -> u64 {
        self.inner.rejected.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            admitted: self.admitted(),
            rejected: self.rejected(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inner.admitted.store(0, Ordering::Relaxed);
        self.inner.rejected.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of validation metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total number of candidates admitted
    pub admitted: u64,
    /// Total number of candidates rejected
    pub rejected: u64,
}

impl MetricsSnapshot {
    /// Total number of candidates validated.
    pub fn total(&self) -> u64 {
        self.admitted.saturating_add(self.rejected)
    }

    /// Ratio of rejected candidates to total (0.0 to 1.0).
    ///
    /// Returns 0.0 when no candidates have been validated.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.rejected as f64 / total as f64
        }
    }
}
