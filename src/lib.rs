//! Assay library crate (used by the binary, benchmarks, and integration tests).
//!
//! Scores a generated analysis and the sources it cites across four weighted
//! dimensions and returns a [`QualityAssessment`].
//!
//! # Public API Surface
//!
//! ## Entry Point
//! - [`QualityEngine`] - `assess_quality(content, sources, subject)`, cache maintenance
//! - [`Config`], [`Preset`], [`ConfigError`] - Engine configuration
//!
//! ## Data Model
//! - [`Source`], [`QualityAssessment`], [`QualityDimension`], [`Confidence`]
//!
//! ## Pipeline
//! - [`SourceReliabilityAnalyzer`] - Domain authority and content heuristics
//! - [`DimensionEvaluator`], [`EvaluatorSet`] - The four quality dimensions
//! - [`Orchestrator`] - Parallel or stage-gated sequential scheduling
//! - [`ScoreAggregator`] - Weighted overall score, confidence, recommendations
//!
//! ## Caching
//! - [`TtlCache`], [`AssessmentCache`] - Bounded TTL caches
//! - [`Clock`], [`ManualClock`] - Injectable time for expiry tests
//!
//! ## Telemetry
//! - [`PerformanceMonitor`], [`Benchmark`] - Timings, hit rate, preset comparison

pub mod cache;
pub mod config;
pub mod constants;
pub mod engine;
pub mod evaluators;
pub mod hashing;
pub mod monitor;
pub mod orchestrator;
pub mod scoring;
pub mod source;

pub use cache::{
    AssessmentCache, AssessmentKey, CacheEntry, CacheStatus, Clock, ManualClock, SystemClock,
    TtlCache,
};
pub use config::{Config, ConfigError, Preset};
pub use constants::{CANONICAL_WEIGHTS, WeightValidationError, clamp_score, validate_weights};
pub use engine::{AssessmentError, AssessmentRequest, CleanupReport, QualityEngine};
pub use evaluators::{ConsistencyMode, DimensionEvaluator, EvaluationInput, EvaluatorSet};
pub use hashing::{hash_assessment_key, hash_to_u64};
pub use monitor::{
    Benchmark, BenchmarkResult, MonitorSummary, PerformanceMetrics, PerformanceMonitor,
};
pub use orchestrator::{
    CancellationToken, OrchestrationOutcome, OrchestrationState, Orchestrator, StageGate,
    Strategy,
};
pub use scoring::{
    Confidence, DimensionKind, QualityAssessment, QualityDimension, ScoreAggregator,
    determine_confidence,
};
pub use source::{
    AnalyzerConfig, DomainCacheMode, ReliabilityCategory, ReliabilityScore,
    SourceReliabilityAnalyzer, SourceSetEvaluation, Source,
};
