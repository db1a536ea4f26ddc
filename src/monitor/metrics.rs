use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Finished measurements kept for [`PerformanceMonitor::recent`].
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Returns the current process memory in bytes, when the platform exposes it.
pub type MemoryProbe = fn() -> Option<u64>;

/// Resident set size from `/proc/self/statm` (Linux only, best-effort).
pub fn resident_memory_bytes() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        const PAGE_SIZE: u64 = 4096;
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let rss_pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
        Some(rss_pages * PAGE_SIZE)
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// One measured operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub operation_id: String,
    /// Wall-clock duration in microseconds.
    pub duration_us: u64,
    /// Memory growth over the operation; `None` without a memory probe.
    pub memory_delta_bytes: Option<i64>,
    pub cache_hit: bool,
    pub recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PerformanceMetrics {
    pub fn duration(&self) -> Duration {
        Duration::from_micros(self.duration_us)
    }
}

/// Snapshot of the monitor's counters and history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSummary {
    pub operations: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Percentage in `[0, 100]`.
    pub cache_hit_rate: f64,
    pub average_duration_us: f64,
    pub max_duration_us: u64,
}

/// Cache hit/miss counters and a bounded history of timed operations.
///
/// Purely observational; nothing here feeds back into scoring.
#[derive(Debug)]
pub struct PerformanceMonitor {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    history: Mutex<VecDeque<PerformanceMetrics>>,
    history_limit: usize,
    memory_probe: Option<MemoryProbe>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            history: Mutex::new(VecDeque::with_capacity(history_limit)),
            history_limit: history_limit.max(1),
            memory_probe: None,
        }
    }

    /// Attaches a memory probe used to fill [`PerformanceMetrics::memory_delta_bytes`].
    pub fn with_memory_probe(mut self, probe: MemoryProbe) -> Self {
        self.memory_probe = Some(probe);
        self
    }

    /// Starts timing an operation. Call [`Measurement::finish`] to record it.
    pub fn start_measurement(&self, operation_id: impl Into<String>) -> Measurement<'_> {
        Measurement {
            monitor: self,
            operation_id: operation_id.into(),
            started: Instant::now(),
            memory_before: self.memory_probe.and_then(|probe| probe()),
            cache_hit: false,
        }
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Hit rate as a percentage. `0.0` before any lookup.
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits();
        let total = hits + self.cache_misses();
        if total == 0 {
            return 0.0;
        }
        hits as f64 / total as f64 * 100.0
    }

    /// Most recent measurements, oldest first.
    pub fn recent(&self) -> Vec<PerformanceMetrics> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn summary(&self) -> MonitorSummary {
        let history = self.history.lock();
        let operations = history.len();
        let total_us: u64 = history.iter().map(|m| m.duration_us).sum();
        let max_duration_us = history.iter().map(|m| m.duration_us).max().unwrap_or(0);

        MonitorSummary {
            operations,
            cache_hits: self.cache_hits(),
            cache_misses: self.cache_misses(),
            cache_hit_rate: self.cache_hit_rate(),
            average_duration_us: if operations == 0 {
                0.0
            } else {
                total_us as f64 / operations as f64
            },
            max_duration_us,
        }
    }

    /// Zeroes the counters and drops the history.
    pub fn reset(&self) {
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.history.lock().clear();
    }

    fn record(&self, metrics: PerformanceMetrics) {
        let mut history = self.history.lock();
        while history.len() >= self.history_limit {
            history.pop_front();
        }
        history.push_back(metrics);
    }
}

/// An in-progress timing started by [`PerformanceMonitor::start_measurement`].
#[derive(Debug)]
pub struct Measurement<'a> {
    monitor: &'a PerformanceMonitor,
    operation_id: String,
    started: Instant,
    memory_before: Option<u64>,
    cache_hit: bool,
}

impl Measurement<'_> {
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    pub fn set_cache_hit(&mut self, hit: bool) {
        self.cache_hit = hit;
    }

    /// Stops the clock, stores the metrics in the monitor's history, and returns them.
    pub fn finish(self, extra: BTreeMap<String, serde_json::Value>) -> PerformanceMetrics {
        let duration = self.started.elapsed();
        let memory_delta_bytes = match (self.memory_before, self.monitor.memory_probe) {
            (Some(before), Some(probe)) => probe().map(|after| after as i64 - before as i64),
            _ => None,
        };

        let metrics = PerformanceMetrics {
            operation_id: self.operation_id,
            duration_us: duration.as_micros() as u64,
            memory_delta_bytes,
            cache_hit: self.cache_hit,
            recorded_at: Utc::now(),
            extra,
        };

        debug!(
            operation_id = %metrics.operation_id,
            duration_us = metrics.duration_us,
            cache_hit = metrics.cache_hit,
            "Recorded measurement"
        );

        self.monitor.record(metrics.clone());
        metrics
    }
}
