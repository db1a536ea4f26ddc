use tracing::debug;

use crate::constants::{
    FALLBACK_SCORE_WITH_SOURCES, HIGH_CONFIDENCE_SCORE, MAX_DIMENSION_RECOMMENDATIONS,
    MAX_RECOMMENDATIONS, MEDIUM_CONFIDENCE_SCORE, MIN_SCORE, MIN_SOURCE_COUNT,
    RECOMMENDED_SOURCE_COUNT, VERIFICATION_SCORE, WEAK_DIMENSION_SCORE, clamp_score,
};

use super::types::{Confidence, DimensionKind, QualityAssessment, QualityDimension};

/// Recommendation appended when fewer than [`RECOMMENDED_SOURCE_COUNT`] sources were used.
pub const SOURCE_COUNT_RECOMMENDATION: &str =
    "Add more authoritative sources (at least 3 recommended)";

/// Diagnostic text carried by the fallback assessment.
pub const FALLBACK_DESCRIPTION: &str = "Quality evaluation did not complete";

/// Confidence tier from the overall score and the number of sources.
///
/// High needs `score >= 80` and at least 3 sources; medium needs `score >= 60` and
/// at least 2 sources; everything else is low.
pub fn determine_confidence(score: f64, source_count: usize) -> Confidence {
    if score >= HIGH_CONFIDENCE_SCORE && source_count >= RECOMMENDED_SOURCE_COUNT {
        Confidence::High
    } else if score >= MEDIUM_CONFIDENCE_SCORE && source_count >= MIN_SOURCE_COUNT {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// `true` when the score is below 70 or fewer than 2 sources back the content.
#[inline]
pub fn needs_verification(score: f64, source_count: usize) -> bool {
    score < VERIFICATION_SCORE || source_count < MIN_SOURCE_COUNT
}

/// Combines dimension scores into a [`QualityAssessment`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the final assessment.
    ///
    /// A single dimension (stage-gated early exit) is reported as-is: its raw score
    /// becomes the overall score with no weighting. Otherwise the canonical weights
    /// are applied; with all four dimensions present they sum to `1.0`.
    pub fn compile(
        &self,
        dimensions: Vec<QualityDimension>,
        source_count: usize,
    ) -> QualityAssessment {
        let overall_score = Self::overall_score(&dimensions);
        let confidence = determine_confidence(overall_score, source_count);
        let needs_verification = needs_verification(overall_score, source_count);
        let recommendations = Self::recommendations(&dimensions, source_count);

        debug!(
            overall_score,
            dimensions = dimensions.len(),
            confidence = %confidence,
            needs_verification,
            "Compiled quality assessment"
        );

        QualityAssessment {
            overall_score,
            dimensions,
            recommendations,
            confidence,
            needs_verification,
        }
    }

    /// Degraded assessment returned when evaluation fails.
    pub fn fallback(&self, source_count: usize, reason: &str) -> QualityAssessment {
        let overall_score = if source_count > 0 {
            FALLBACK_SCORE_WITH_SOURCES
        } else {
            MIN_SCORE
        };

        let dimension = QualityDimension::new(
            DimensionKind::Diagnostic,
            overall_score,
            FALLBACK_DESCRIPTION,
            vec![format!("Evaluation did not complete: {}", reason)],
        );

        QualityAssessment {
            overall_score,
            dimensions: vec![dimension],
            recommendations: vec![
                "Verify this analysis manually; automated quality checks did not finish"
                    .to_string(),
            ],
            confidence: Confidence::Low,
            needs_verification: true,
        }
    }

    fn overall_score(dimensions: &[QualityDimension]) -> f64 {
        match dimensions {
            [] => MIN_SCORE,
            [single] => single.score,
            many => {
                let (weighted, total_weight) =
                    many.iter().fold((0.0, 0.0), |(weighted, total), d| {
                        let w = d.kind.weight();
                        (weighted + d.score * w, total + w)
                    });
                if total_weight <= 0.0 {
                    return MIN_SCORE;
                }
                clamp_score(weighted / total_weight).round()
            }
        }
    }

    fn recommendations(dimensions: &[QualityDimension], source_count: usize) -> Vec<String> {
        let mut recommendations: Vec<String> = dimensions
            .iter()
            .filter(|d| d.score < WEAK_DIMENSION_SCORE)
            .take(MAX_DIMENSION_RECOMMENDATIONS)
            .map(|d| format!("{} needs improvement", d.name))
            .collect();

        if source_count < RECOMMENDED_SOURCE_COUNT {
            recommendations.push(SOURCE_COUNT_RECOMMENDATION.to_string());
        }

        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}
