use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::{DimensionKind, QualityDimension};

use super::{DimensionEvaluator, EvaluationInput};

pub const SPECIFICITY_BASE: f64 = 60.0;
pub const PATTERN_BONUS: f64 = 10.0;
pub const VAGUE_ALLOWANCE: usize = 2;
pub const VAGUE_PENALTY: f64 = 5.0;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid year regex"));

static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([$€£¥]\s?\d[\d,]*(\.\d+)?|\b\d[\d,]*(\.\d+)?\s?(million|billion|trillion)\b|\b(usd|eur|gbp)\s?\d)",
    )
    .expect("valid currency regex")
});

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(\.\d+)?\s?(%|percent\b)").expect("valid percentage regex")
});

static PROPER_NOUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b").expect("valid proper noun regex"));

static VAGUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(various|many|some|several|often|might|could potentially|possibly|perhaps|it is possible|generally|somewhat|a lot of|numerous|relatively|in some cases|significant amount)\b",
    )
    .expect("valid vague phrase regex")
});

/// Concrete-detail pattern types. Each type scores once regardless of match count.
pub fn matched_patterns(content: &str) -> Vec<&'static str> {
    let patterns: [(&LazyLock<Regex>, &'static str); 4] = [
        (&YEAR_RE, "years"),
        (&CURRENCY_RE, "monetary figures"),
        (&PERCENT_RE, "percentages"),
        (&PROPER_NOUN_RE, "named entities"),
    ];
    patterns
        .into_iter()
        .filter(|(re, _)| re.is_match(content))
        .map(|(_, label)| label)
        .collect()
}

/// Number of vague hedging phrases.
pub fn count_vague_phrases(content: &str) -> usize {
    VAGUE_RE.find_iter(content).count()
}

pub fn evaluate(content: &str) -> QualityDimension {
    let patterns = matched_patterns(content);
    let vague = count_vague_phrases(content);
    let excess_vague = vague.saturating_sub(VAGUE_ALLOWANCE);

    let score = SPECIFICITY_BASE + patterns.len() as f64 * PATTERN_BONUS
        - excess_vague as f64 * VAGUE_PENALTY;

    let mut issues = Vec::new();
    if excess_vague > 0 {
        issues.push(format!(
            "Content lacks specificity: {} vague phrases",
            vague
        ));
    }
    if patterns.is_empty() {
        issues.push(
            "No concrete data points (years, monetary figures, percentages, or named entities)"
                .to_string(),
        );
    }

    let description = if patterns.is_empty() {
        format!("No concrete details; {} vague phrases", vague)
    } else {
        format!("Concrete details: {}; {} vague phrases", patterns.join(", "), vague)
    };

    QualityDimension::new(DimensionKind::Specificity, score, description, issues)
}

pub struct SpecificityEvaluator;

impl DimensionEvaluator for SpecificityEvaluator {
    fn kind(&self) -> DimensionKind {
        DimensionKind::Specificity
    }

    fn evaluate(&self, input: &EvaluationInput) -> QualityDimension {
        evaluate(&input.content)
    }
}
