//! Dimension and assessment types plus weighted aggregation.
//!
//! Overall scores are rounded to whole points. A stage-gated early exit carries a
//! single dimension whose raw score is passed through unweighted; callers can tell
//! the two cases apart with [`QualityAssessment::is_early_exit`].

pub mod aggregator;
pub mod types;


pub use aggregator::{
    FALLBACK_DESCRIPTION, SOURCE_COUNT_RECOMMENDATION, ScoreAggregator, determine_confidence,
    needs_verification,
};
pub use types::{Confidence, DimensionKind, QualityAssessment, QualityDimension};
