//! Operational telemetry: per-operation timings, cache hit rate, and a small
//! benchmark harness for comparing configuration presets.

pub mod benchmark;
pub mod metrics;


pub use benchmark::{Benchmark, BenchmarkResult};
pub use metrics::{
    DEFAULT_HISTORY_LIMIT, Measurement, MemoryProbe, MonitorSummary, PerformanceMetrics,
    PerformanceMonitor, resident_memory_bytes,
};
