//! Dispatch metrics for observability
//!
//! Counts what the logger did with each message: whether it reached the
//! console and how publisher fan-out went. Counters are informational only
//! and never change dispatch behavior.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use uatu_logger::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_published();
/// metrics.record_publish_failed();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.publish_failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Messages built and dispatched
    dispatched: AtomicU64,

    /// Lines written to the console
    console_lines: AtomicU64,

    /// Successful publisher deliveries
    published: AtomicU64,

    /// Failed publisher deliveries
    publish_failures: AtomicU64,

    /// Messages whose fan-out was skipped because they could not be serialized
    serialization_failures: AtomicU64,
}

impl DispatchMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            console_lines: AtomicU64::new(0),
            published: AtomicU64::new(0),
            publish_failures: AtomicU64::new(0),
            serialization_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_lines(&self) -> u64 {
        self.console_lines.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn publish_failures(&self) -> u64 {
        self.publish_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn serialization_failures(&self) -> u64 {
        self.serialization_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_line(&self) -> u64 {
        self.console_lines.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_published(&self) -> u64 {
        self.published.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_publish_failed(&self) -> u64 {
        self.publish_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_serialization_failed(&self) -> u64 {
        self.serialization_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed deliveries as a percentage of all delivery attempts (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been published yet.
    pub fn publish_failure_rate(&self) -> f64 {
        let failed = self.publish_failures() as f64;
        let total = self.published() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.console_lines.store(0, Ordering::Relaxed);
        self.published.store(0, Ordering::Relaxed);
        self.publish_failures.store(0, Ordering::Relaxed);
        self.serialization_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            console_lines: AtomicU64::new(self.console_lines()),
            published: AtomicU64::new(self.published()),
            publish_failures: AtomicU64::new(self.publish_failures()),
            serialization_failures: AtomicU64::new(self.serialization_failures()),
        }
    }
}
