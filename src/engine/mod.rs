//! The assessment entry point.
//!
//! [`QualityEngine`] owns every service the pipeline needs (domain analyzer,
//! assessment cache, orchestrator, aggregator, monitor). Construct one per host
//! process and share it behind an `Arc`; there is no global state.
//!
//! ```text
//! assess_quality ─► assessment cache ─hit─► cached assessment
//!                        │ miss
//!                        ▼
//!                   orchestrator ─► aggregator ─► store ─► assessment
//!                        │ error
//!                        ▼
//!                   fallback assessment (not cached)
//! ```

pub mod error;


pub use error::{AssessmentError, AssessmentResult};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::cache::{AssessmentCache, CacheStatus, Clock, SystemClock};
use crate::config::{Config, ConfigError};
use crate::evaluators::{EvaluationInput, EvaluatorSet};
use crate::monitor::{PerformanceMonitor, resident_memory_bytes};
use crate::orchestrator::Orchestrator;
use crate::scoring::{QualityAssessment, ScoreAggregator};
use crate::source::{Source, SourceReliabilityAnalyzer};

/// One assessment request, as read by the binary or the benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub content: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub subject: String,
}

/// Entries removed by one maintenance sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub domains: usize,
    pub assessments: usize,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.domains + self.assessments
    }
}

/// Scores generated analyses for quality.
pub struct QualityEngine {
    config: Config,
    analyzer: Arc<SourceReliabilityAnalyzer>,
    /// `None` when caching is disabled.
    assessments: Option<Arc<AssessmentCache>>,
    orchestrator: Orchestrator,
    aggregator: ScoreAggregator,
    monitor: Arc<PerformanceMonitor>,
    maintenance_running: Arc<AtomicBool>,
    maintenance_task: Mutex<Option<JoinHandle<()>>>,
}

impl QualityEngine {
    /// Validates `config` and builds the canonical pipeline.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Like [`new`](Self::new), with the clock that drives cache expiry.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        let analyzer = Arc::new(SourceReliabilityAnalyzer::with_clock(
            config.analyzer_config(),
            Arc::clone(&clock),
        ));
        let evaluators = EvaluatorSet::canonical(Arc::clone(&analyzer), config.consistency_mode);
        Ok(Self::assemble(config, clock, analyzer, evaluators))
    }

    /// Builds an engine around a custom evaluator set. The first evaluator is the
    /// stage gate.
    pub fn with_evaluators(
        config: Config,
        clock: Arc<dyn Clock>,
        evaluators: EvaluatorSet,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let analyzer = Arc::new(SourceReliabilityAnalyzer::with_clock(
            config.analyzer_config(),
            Arc::clone(&clock),
        ));
        Ok(Self::assemble(config, clock, analyzer, evaluators))
    }

    fn assemble(
        config: Config,
        clock: Arc<dyn Clock>,
        analyzer: Arc<SourceReliabilityAnalyzer>,
        evaluators: EvaluatorSet,
    ) -> Self {
        let assessments = config.enable_caching.then(|| {
            Arc::new(AssessmentCache::with_clock(
                config.assessment_cache_ttl,
                config.max_cache_entries,
                config.cache_key_prefix_chars,
                clock,
            ))
        });
        let orchestrator = Orchestrator::from_config(&config, evaluators);

        Self {
            config,
            analyzer,
            assessments,
            orchestrator,
            aggregator: ScoreAggregator::new(),
            monitor: Arc::new(PerformanceMonitor::new().with_memory_probe(resident_memory_bytes)),
            maintenance_running: Arc::new(AtomicBool::new(false)),
            maintenance_task: Mutex::new(None),
        }
    }

    /// Assesses `content` against its `sources`.
    ///
    /// Never fails: internal errors yield the fallback assessment (score 50 with
    /// sources, 0 without, low confidence, flagged for verification).
    #[instrument(
        skip_all,
        fields(content_len = content.len(), sources = sources.len(), subject = %subject)
    )]
    pub async fn assess_quality(
        &self,
        content: &str,
        sources: &[Source],
        subject: &str,
    ) -> QualityAssessment {
        let mut measurement = self.monitor.start_measurement(Uuid::new_v4().to_string());

        let key = self
            .assessments
            .as_ref()
            .map(|cache| cache.key_for(content, sources, subject));
        let mut extra: BTreeMap<String, serde_json::Value> = BTreeMap::new();

        let status = match (&self.assessments, &key) {
            (Some(cache), Some(key)) => match cache.get(key) {
                Some(cached) => {
                    self.monitor.record_cache_hit();
                    measurement.set_cache_hit(true);
                    extra.insert("cache_status".to_string(), CacheStatus::Hit.as_str().into());
                    measurement.finish(extra);
                    debug!(overall_score = cached.overall_score, "Returning cached assessment");
                    return cached;
                }
                None => {
                    self.monitor.record_cache_miss();
                    CacheStatus::Miss
                }
            },
            _ => CacheStatus::Disabled,
        };
        extra.insert("cache_status".to_string(), status.as_str().into());

        let input = Arc::new(EvaluationInput::new(content, sources.to_vec(), subject));

        let assessment = match self.orchestrator.run(input).await {
            Ok(outcome) => {
                extra.insert("state".to_string(), outcome.state.as_str().into());
                extra.insert("dimensions".to_string(), outcome.dimensions.len().into());

                let assessment = self.aggregator.compile(outcome.dimensions, sources.len());
                info!(
                    overall_score = assessment.overall_score,
                    confidence = %assessment.confidence,
                    state = %outcome.state,
                    early_exit = outcome.early_exit,
                    elapsed_ms = outcome.elapsed.as_millis() as u64,
                    "Assessment complete"
                );
                assessment
            }
            Err(err) => {
                warn!(error = %err, "Assessment pipeline failed; returning fallback");
                extra.insert("fallback".to_string(), true.into());
                self.aggregator.fallback(sources.len(), &err.to_string())
            }
        };

        if let (Some(cache), Some(key)) = (&self.assessments, key) {
            if !assessment.is_fallback() {
                cache.insert(key, assessment.clone());
            }
        }

        measurement.finish(extra);
        assessment
    }

    /// Sweeps expired entries from both caches once.
    pub fn run_maintenance(&self) -> CleanupReport {
        sweep(&self.analyzer, self.assessments.as_deref())
    }

    /// Spawns the periodic cache sweep (no-op if already running).
    ///
    /// Returns `true` if a new task was started. Must be called inside a Tokio runtime.
    pub fn start_maintenance(&self) -> bool {
        // AcqRel: only one caller may win the swap and spawn the task.
        if self.maintenance_running.swap(true, Ordering::AcqRel) {
            return false;
        }

        let analyzer = Arc::clone(&self.analyzer);
        let assessments = self.assessments.clone();
        let running = Arc::clone(&self.maintenance_running);
        let period = self.config.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !running.load(Ordering::Acquire) {
                    break;
                }
                sweep(&analyzer, assessments.as_deref());
            }
        });

        *self.maintenance_task.lock() = Some(handle);
        debug!(period_ms = period.as_millis() as u64, "Started cache maintenance");
        true
    }

    pub fn is_maintenance_running(&self) -> bool {
        self.maintenance_running.load(Ordering::Acquire)
    }

    /// Stops maintenance and empties both caches. Safe to call repeatedly.
    pub fn shutdown(&self) {
        self.stop_maintenance();
        self.clear_caches();
        info!("Quality engine shut down");
    }

    /// Empties both caches and resets the monitor.
    pub fn clear_caches(&self) {
        self.analyzer.clear();
        if let Some(cache) = &self.assessments {
            cache.clear();
        }
        self.monitor.reset();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    pub fn analyzer(&self) -> &SourceReliabilityAnalyzer {
        &self.analyzer
    }

    /// Number of memoized assessments (`0` with caching disabled).
    pub fn cached_assessments(&self) -> u64 {
        self.assessments.as_ref().map_or(0, |cache| cache.len())
    }

    fn stop_maintenance(&self) {
        self.maintenance_running.store(false, Ordering::Release);
        if let Some(handle) = self.maintenance_task.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for QualityEngine {
    fn drop(&mut self) {
        self.stop_maintenance();
    }
}

impl std::fmt::Debug for QualityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityEngine")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer)
            .field("assessments", &self.assessments)
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}

fn sweep(
    analyzer: &SourceReliabilityAnalyzer,
    assessments: Option<&AssessmentCache>,
) -> CleanupReport {
    let report = CleanupReport {
        domains: analyzer.cleanup(),
        assessments: assessments.map_or(0, AssessmentCache::cleanup),
    };
    if report.total() > 0 {
        debug!(
            domains = report.domains,
            assessments = report.assessments,
            "Swept expired cache entries"
        );
    }
    report
}
