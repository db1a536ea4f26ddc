use std::sync::Arc;

use crate::constants::RECOMMENDED_SOURCE_COUNT;
use crate::scoring::{DimensionKind, QualityDimension};
use crate::source::{Source, SourceReliabilityAnalyzer};

use super::{DimensionEvaluator, EvaluationInput};

const LOW_RELIABILITY_MEAN: f64 = 60.0;

/// Scores the source list through [`SourceReliabilityAnalyzer::evaluate_source_set`].
pub fn evaluate(analyzer: &SourceReliabilityAnalyzer, sources: &[Source]) -> QualityDimension {
    let eval = analyzer.evaluate_source_set(sources);
    let mut issues = Vec::new();

    if eval.overall_reliability < LOW_RELIABILITY_MEAN {
        issues.push(format!(
            "Low reliability: average source score {:.0}/100",
            eval.overall_reliability
        ));
    }
    if sources.len() < RECOMMENDED_SOURCE_COUNT {
        issues.push(format!(
            "Insufficient sources: {} provided, at least {} recommended",
            sources.len(),
            RECOMMENDED_SOURCE_COUNT
        ));
    }
    if eval.high_quality_sources == 0 {
        issues.push("No high-reliability sources".to_string());
    }

    QualityDimension::new(
        DimensionKind::SourceReliability,
        eval.overall_reliability,
        format!(
            "Average reliability {:.0} across {} sources ({} high-quality)",
            eval.overall_reliability,
            sources.len(),
            eval.high_quality_sources
        ),
        issues,
    )
}

pub struct SourceReliabilityEvaluator {
    analyzer: Arc<SourceReliabilityAnalyzer>,
}

impl SourceReliabilityEvaluator {
    pub fn new(analyzer: Arc<SourceReliabilityAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl DimensionEvaluator for SourceReliabilityEvaluator {
    fn kind(&self) -> DimensionKind {
        DimensionKind::SourceReliability
    }

    fn evaluate(&self, input: &EvaluationInput) -> QualityDimension {
        evaluate(&self.analyzer, &input.sources)
    }
}
