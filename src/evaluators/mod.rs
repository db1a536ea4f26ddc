//! The four quality dimensions.
//!
//! Each dimension is a pure, total function of the request (content, sources,
//! subject) that yields a [`QualityDimension`]. The module-level `evaluate`
//! functions hold the heuristics; the [`DimensionEvaluator`] impls wrap them so the
//! orchestrator can schedule them uniformly.

pub mod completeness;
pub mod consistency;
pub mod reliability;
pub mod specificity;


use std::sync::Arc;

use crate::scoring::{DimensionKind, QualityDimension};
use crate::source::{Source, SourceReliabilityAnalyzer};

pub use completeness::ContentCompletenessEvaluator;
pub use consistency::{ConsistencyMode, LogicalConsistencyEvaluator};
pub use reliability::SourceReliabilityEvaluator;
pub use specificity::SpecificityEvaluator;

/// Everything an evaluator may look at. Shared read-only across evaluator tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationInput {
    pub content: String,
    pub sources: Vec<Source>,
    pub subject: String,
}

impl EvaluationInput {
    pub fn new(content: impl Into<String>, sources: Vec<Source>, subject: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sources,
            subject: subject.into(),
        }
    }
}

/// A single quality dimension.
///
/// Implementations must be total: they return a dimension for every input and
/// must not panic. They must also be free of observable side effects (memoization
/// aside), because a timed-out parallel run abandons them mid-flight.
pub trait DimensionEvaluator: Send + Sync {
    fn kind(&self) -> DimensionKind;

    fn evaluate(&self, input: &EvaluationInput) -> QualityDimension;
}

/// Evaluators in canonical priority order.
#[derive(Clone)]
pub struct EvaluatorSet {
    evaluators: Vec<Arc<dyn DimensionEvaluator>>,
}

impl EvaluatorSet {
    /// The four canonical evaluators: reliability, completeness, consistency, specificity.
    pub fn canonical(analyzer: Arc<SourceReliabilityAnalyzer>, consistency: ConsistencyMode) -> Self {
        Self {
            evaluators: vec![
                Arc::new(SourceReliabilityEvaluator::new(analyzer)),
                Arc::new(ContentCompletenessEvaluator),
                Arc::new(LogicalConsistencyEvaluator::new(consistency)),
                Arc::new(SpecificityEvaluator),
            ],
        }
    }

    /// Builds a set from explicit evaluators. The first one is the stage gate.
    pub fn from_evaluators(evaluators: Vec<Arc<dyn DimensionEvaluator>>) -> Self {
        Self { evaluators }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DimensionEvaluator>> {
        self.evaluators.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<dyn DimensionEvaluator>> {
        self.evaluators.get(index)
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    pub fn kinds(&self) -> Vec<DimensionKind> {
        self.evaluators.iter().map(|e| e.kind()).collect()
    }
}

impl std::fmt::Debug for EvaluatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorSet")
            .field("kinds", &self.kinds())
            .finish()
    }
}
