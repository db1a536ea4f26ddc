use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{Config, ConfigError, Preset};
use crate::engine::{AssessmentRequest, QualityEngine};

/// Failure messages kept per benchmark run.
const MAX_RECORDED_ERRORS: usize = 5;

/// Aggregate latency and success figures for one benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub iterations: usize,
    pub successes: usize,
    pub failures: usize,
    pub average_us: f64,
    pub min_us: u64,
    pub max_us: u64,
    /// Percentage of iterations that succeeded.
    pub success_rate: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl BenchmarkResult {
    pub fn average(&self) -> Duration {
        Duration::from_secs_f64(self.average_us / 1_000_000.0)
    }
}

/// Runs an async operation repeatedly and aggregates its latency.
pub struct Benchmark;

impl Benchmark {
    /// Executes `f` `iterations` times.
    ///
    /// An `Err` or a panic in one iteration counts as a failure and the batch
    /// continues. Latency covers every iteration, failed or not.
    pub async fn run<F, Fut, T, E>(
        name: impl Into<String>,
        iterations: usize,
        mut f: F,
    ) -> BenchmarkResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let name = name.into();
        let mut successes = 0;
        let mut errors = Vec::new();
        let mut total = Duration::ZERO;
        let mut min = Duration::MAX;
        let mut max = Duration::ZERO;

        for iteration in 0..iterations {
            let started = Instant::now();
            let outcome = AssertUnwindSafe(async { f().await }).catch_unwind().await;
            let elapsed = started.elapsed();

            total += elapsed;
            min = min.min(elapsed);
            max = max.max(elapsed);

            let failure = match outcome {
                Ok(Ok(_)) => {
                    successes += 1;
                    None
                }
                Ok(Err(err)) => Some(err.to_string()),
                Err(_) => Some("iteration panicked".to_string()),
            };

            if let Some(message) = failure {
                warn!(benchmark = %name, iteration, error = %message, "Benchmark iteration failed");
                if errors.len() < MAX_RECORDED_ERRORS {
                    errors.push(message);
                }
            }
        }

        let failures = iterations - successes;
        let result = BenchmarkResult {
            name,
            iterations,
            successes,
            failures,
            average_us: if iterations == 0 {
                0.0
            } else {
                total.as_micros() as f64 / iterations as f64
            },
            min_us: if iterations == 0 {
                0
            } else {
                min.as_micros() as u64
            },
            max_us: max.as_micros() as u64,
            success_rate: if iterations == 0 {
                0.0
            } else {
                successes as f64 / iterations as f64 * 100.0
            },
            errors,
        };

        info!(
            benchmark = %result.name,
            iterations,
            average_us = result.average_us,
            success_rate = result.success_rate,
            "Benchmark finished"
        );
        result
    }

    /// Runs `request` through a fresh engine per [`Preset`], one result each.
    ///
    /// Caches stay warm across iterations, so presets with longer TTLs show it.
    /// A fallback assessment counts as a failed iteration.
    pub async fn compare_presets(
        request: &AssessmentRequest,
        iterations: usize,
    ) -> Result<Vec<BenchmarkResult>, ConfigError> {
        let mut results = Vec::with_capacity(Preset::ALL.len());

        for preset in Preset::ALL {
            let engine = QualityEngine::new(Config::preset(preset))?;
            let engine = &engine;

            let result = Self::run(preset.as_str(), iterations, || async move {
                let assessment = engine
                    .assess_quality(&request.content, &request.sources, &request.subject)
                    .await;
                if assessment.is_fallback() {
                    Err("fallback assessment")
                } else {
                    Ok(assessment)
                }
            })
            .await;

            results.push(result);
        }

        Ok(results)
    }
}
