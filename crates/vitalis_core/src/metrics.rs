//! Performance metrics collection for the engine.
//!
//! Provides structured logging and metrics tracking for monitoring
//! step throughput and population health.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How often a step is surfaced at info level.
const STEP_LOG_CADENCE: u64 = 1000;

/// Metrics collector for engine statistics.
pub struct Metrics {
    step_count: AtomicU64,
    alive_count: AtomicU64,
    cell_count: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_count: AtomicU64::new(0),
            alive_count: AtomicU64::new(0),
            cell_count: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration.
    pub fn record_step(&self, duration: Duration, alive: usize, cells: usize) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
        self.alive_count.store(alive as u64, Ordering::Relaxed);
        self.cell_count.store(cells as u64, Ordering::Relaxed);

        let step = self.step_count.load(Ordering::Relaxed);
        if step.is_multiple_of(STEP_LOG_CADENCE) {
            tracing::info!(
                step = step,
                alive = alive,
                cells = cells,
                duration_us = duration.as_micros() as u64,
                "engine step"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Gets the current step count.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    /// Gets the alive-cell count recorded by the last step.
    #[must_use]
    pub fn alive_count(&self) -> u64 {
        self.alive_count.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.step_count(), 0);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new();
        metrics.record_step(Duration::from_millis(4), 120, 4096);
        assert_eq!(metrics.step_count(), 1);
        assert_eq!(metrics.alive_count(), 120);
    }

    #[test]
    fn test_increment_counter() {
        let metrics = Metrics::new();
        metrics.increment_counter("reconfigure");
        metrics.increment_counter("reconfigure");
        let counters = metrics.counters.lock().unwrap();
        assert_eq!(
            counters["reconfigure"].load(Ordering::Relaxed),
            2
        );
    }
}
