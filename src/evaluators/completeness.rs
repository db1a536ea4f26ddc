use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::{DimensionKind, QualityDimension};

use super::{DimensionEvaluator, EvaluationInput};

pub const COMPLETENESS_BASE: f64 = 70.0;
pub const MIN_CONTENT_CHARS: usize = 500;
pub const SHORT_CONTENT_PENALTY: f64 = 15.0;

/// A semantic section every analysis is expected to cover.
pub struct RequiredCategory {
    pub name: &'static str,
    pub weight: f64,
    pattern: Regex,
}

impl RequiredCategory {
    fn new(name: &'static str, weight: f64, keywords: &str) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b({})\b", keywords))
            .expect("valid category keyword regex");
        Self {
            name,
            weight,
            pattern,
        }
    }

    pub fn is_covered(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

pub static REQUIRED_CATEGORIES: LazyLock<[RequiredCategory; 3]> = LazyLock::new(|| {
    [
        RequiredCategory::new(
            "technology description",
            15.0,
            r"technolog\w*|technical|architecture|implementation|mechanism|platform|innovation|method\w*|process",
        ),
        RequiredCategory::new(
            "market analysis",
            15.0,
            r"markets?|industry|competit\w*|commerciali[sz]\w*|customers?|demand|revenue|adoption|pricing",
        ),
        RequiredCategory::new(
            "risk analysis",
            15.0,
            r"risks?|challenges?|limitations?|barriers?|threats?|uncertaint\w*|drawbacks?|concerns?",
        ),
    ]
});

/// Sum of all category weights; the most a missing-coverage input can lose to categories.
pub fn total_category_weight() -> f64 {
    REQUIRED_CATEGORIES.iter().map(|c| c.weight).sum()
}

/// Deducts for each uncovered category and for content under 500 characters.
pub fn evaluate(content: &str) -> QualityDimension {
    let mut score = COMPLETENESS_BASE;
    let mut issues = Vec::new();
    let mut covered = 0;

    for category in REQUIRED_CATEGORIES.iter() {
        if category.is_covered(content) {
            covered += 1;
        } else {
            score -= category.weight;
            issues.push(format!("Missing {}", category.name));
        }
    }

    let length = content.chars().count();
    if length < MIN_CONTENT_CHARS {
        score -= SHORT_CONTENT_PENALTY;
        issues.push(format!(
            "Content is too brief: {} characters (minimum {})",
            length, MIN_CONTENT_CHARS
        ));
    }

    QualityDimension::new(
        DimensionKind::ContentCompleteness,
        score.max(0.0),
        format!(
            "Covers {} of {} required sections",
            covered,
            REQUIRED_CATEGORIES.len()
        ),
        issues,
    )
}

pub struct ContentCompletenessEvaluator;

impl DimensionEvaluator for ContentCompletenessEvaluator {
    fn kind(&self) -> DimensionKind {
        DimensionKind::ContentCompleteness
    }

    fn evaluate(&self, input: &EvaluationInput) -> QualityDimension {
        evaluate(&input.content)
    }
}
