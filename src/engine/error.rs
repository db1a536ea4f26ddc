//! Assessment pipeline error types.

use thiserror::Error;

use crate::scoring::DimensionKind;

/// Internal pipeline failures.
///
/// These never reach callers of [`QualityEngine::assess_quality`](super::QualityEngine::assess_quality);
/// the engine turns every one of them into the fallback assessment.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// An evaluator panicked inside its blocking task.
    #[error("{dimension} evaluator panicked: {message}")]
    EvaluatorPanicked {
        dimension: DimensionKind,
        message: String,
    },

    /// A task could not be joined (aborted or runtime shutting down).
    #[error("evaluation task failed: {0}")]
    TaskFailed(String),

    /// The run was cancelled before every stage finished.
    #[error("evaluation cancelled")]
    Cancelled,
}

/// Result type for pipeline operations.
pub type AssessmentResult<T> = Result<T, AssessmentError>;
