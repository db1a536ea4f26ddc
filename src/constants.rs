//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Weight Invariants
//!
//! The four canonical dimension weights must sum to exactly `1.0`. The aggregator
//! relies on this to produce an overall score in `[0, 100]` without renormalizing
//! complete assessments. Use [`validate_weights`] when introducing a new weight set.

use std::time::Duration;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

pub const SOURCE_RELIABILITY_WEIGHT: f64 = 0.30;
pub const CONTENT_COMPLETENESS_WEIGHT: f64 = 0.25;
pub const LOGICAL_CONSISTENCY_WEIGHT: f64 = 0.25;
pub const SPECIFICITY_WEIGHT: f64 = 0.20;

/// Canonical weights in evaluation order (reliability, completeness, consistency, specificity).
pub const CANONICAL_WEIGHTS: [f64; 4] = [
    SOURCE_RELIABILITY_WEIGHT,
    CONTENT_COMPLETENESS_WEIGHT,
    LOGICAL_CONSISTENCY_WEIGHT,
    SPECIFICITY_WEIGHT,
];

pub const HIGH_RELIABILITY_THRESHOLD: f64 = 75.0;
pub const MEDIUM_RELIABILITY_THRESHOLD: f64 = 50.0;

pub const HIGH_CONFIDENCE_SCORE: f64 = 80.0;
pub const MEDIUM_CONFIDENCE_SCORE: f64 = 60.0;
pub const VERIFICATION_SCORE: f64 = 70.0;
pub const WEAK_DIMENSION_SCORE: f64 = 60.0;

pub const RECOMMENDED_SOURCE_COUNT: usize = 3;
pub const MIN_SOURCE_COUNT: usize = 2;
pub const MAX_RECOMMENDATIONS: usize = 3;
pub const MAX_DIMENSION_RECOMMENDATIONS: usize = 2;

pub const DEFAULT_STAGE_GATE_THRESHOLD: f64 = 40.0;
pub const DEFAULT_MAX_PROCESSING_TIME: Duration = Duration::from_millis(5_000);
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
pub const DEFAULT_ASSESSMENT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_DOMAIN_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_MAX_CACHE_ENTRIES: u64 = 1_000;
pub const DEFAULT_CACHE_KEY_PREFIX_CHARS: usize = 1_000;
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Score reported by the fallback assessment when at least one source exists.
pub const FALLBACK_SCORE_WITH_SOURCES: f64 = 50.0;

/// Clamps a score into `[MIN_SCORE, MAX_SCORE]`. `NaN` maps to `MIN_SCORE`.
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Error returned when a weight set is not a valid convex combination.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightValidationError {
    /// A weight is negative or not finite.
    InvalidWeight { index: usize, weight: f64 },
    /// Weights do not sum to `1.0`.
    SumMismatch { sum: f64 },
}

impl std::fmt::Display for WeightValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeight { index, weight } => {
                write!(f, "weight {} at index {} is not a finite non-negative number", weight, index)
            }
            Self::SumMismatch { sum } => write!(f, "weights sum to {}, expected 1.0", sum),
        }
    }
}

impl std::error::Error for WeightValidationError {}

/// Validates that weights are finite, non-negative, and sum to `1.0`.
pub fn validate_weights(weights: &[f64]) -> Result<(), WeightValidationError> {
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(WeightValidationError::InvalidWeight { index, weight });
        }
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-9 {
        return Err(WeightValidationError::SumMismatch { sum });
    }
    Ok(())
}
