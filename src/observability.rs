//! Logging setup and run counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install the global fmt subscriber. Logs go to stderr; stdout carries results only.
///
/// Filter comes from `RUST_LOG`, defaulting to `warn`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Counters shared by the workers and the collector
#[derive(Debug, Default)]
pub struct Metrics {
    fetches_succeeded: AtomicU64,
    fetches_failed: AtomicU64,
    records_emitted: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_succeeded(&self) {
        self.fetches_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "fetches_succeeded", "Metric incremented");
    }

    pub fn fetch_failed(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "fetches_failed", "Metric incremented");
    }

    pub fn record_emitted(&self) {
        self.records_emitted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "records_emitted", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fetches_succeeded: self.fetches_succeeded.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            records_emitted: self.records_emitted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub fetches_succeeded: u64,
    pub fetches_failed: u64,
    pub records_emitted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_increments() {
        let metrics = Metrics::new();
        metrics.fetch_succeeded();
        metrics.fetch_succeeded();
        metrics.fetch_failed();
        metrics.record_emitted();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                fetches_succeeded: 2,
                fetches_failed: 1,
                records_emitted: 1,
            }
        );
    }
}
