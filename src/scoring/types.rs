use serde::{Deserialize, Serialize};

use crate::constants::{
    CONTENT_COMPLETENESS_WEIGHT, LOGICAL_CONSISTENCY_WEIGHT, SOURCE_RELIABILITY_WEIGHT,
    SPECIFICITY_WEIGHT, clamp_score,
};

/// One independently scored axis of quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    SourceReliability,
    ContentCompleteness,
    LogicalConsistency,
    Specificity,
    /// Synthetic dimension reported by the fallback assessment.
    Diagnostic,
}

impl DimensionKind {
    /// Canonical evaluation order. Stage-gating only ever gates on the first entry.
    pub const CANONICAL: [DimensionKind; 4] = [
        DimensionKind::SourceReliability,
        DimensionKind::ContentCompleteness,
        DimensionKind::LogicalConsistency,
        DimensionKind::Specificity,
    ];

    /// Fixed aggregation weight (`0.0` for the diagnostic dimension).
    #[inline]
    pub fn weight(&self) -> f64 {
        match self {
            DimensionKind::SourceReliability => SOURCE_RELIABILITY_WEIGHT,
            DimensionKind::ContentCompleteness => CONTENT_COMPLETENESS_WEIGHT,
            DimensionKind::LogicalConsistency => LOGICAL_CONSISTENCY_WEIGHT,
            DimensionKind::Specificity => SPECIFICITY_WEIGHT,
            DimensionKind::Diagnostic => 0.0,
        }
    }

    /// Human-readable name used in dimensions and recommendations.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        match self {
            DimensionKind::SourceReliability => "Source Reliability",
            DimensionKind::ContentCompleteness => "Content Completeness",
            DimensionKind::LogicalConsistency => "Logical Consistency",
            DimensionKind::Specificity => "Specificity",
            DimensionKind::Diagnostic => "Evaluation Status",
        }
    }
}

impl std::fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Score for a single dimension. `score` is always clamped to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityDimension {
    pub kind: DimensionKind,
    pub name: String,
    pub score: f64,
    pub description: String,
    pub issues: Vec<String>,
}

impl QualityDimension {
    pub fn new(
        kind: DimensionKind,
        score: f64,
        description: impl Into<String>,
        issues: Vec<String>,
    ) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            score: clamp_score(score).round(),
            description: description.into(),
            issues,
        }
    }

    #[inline]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Coarse trust tier for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The engine's sole output contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    pub overall_score: f64,
    pub dimensions: Vec<QualityDimension>,
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
    pub needs_verification: bool,
}

impl QualityAssessment {
    /// Looks up a dimension by kind.
    pub fn dimension(&self, kind: DimensionKind) -> Option<&QualityDimension> {
        self.dimensions.iter().find(|d| d.kind == kind)
    }

    /// Returns `true` if only the leading dimension was computed.
    pub fn is_early_exit(&self) -> bool {
        self.dimensions.len() == 1 && self.dimensions[0].kind == DimensionKind::SourceReliability
    }

    /// Returns `true` if this is the degraded fallback assessment.
    pub fn is_fallback(&self) -> bool {
        self.dimensions
            .iter()
            .any(|d| d.kind == DimensionKind::Diagnostic)
    }
}
