//! Lexical contradiction and structure checks.
//!
//! A contradiction is flagged when both halves of an antonym pair appear in the
//! same sentence, e.g. "costs are high ... costs are low". Each pair counts at
//! most once per assessment.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::{DimensionKind, QualityDimension};

use super::{DimensionEvaluator, EvaluationInput};

pub const STANDARD_BASE: f64 = 80.0;
pub const STRICT_BASE: f64 = 100.0;
pub const CONTRADICTION_PENALTY: f64 = 10.0;
pub const MISSING_CONCLUSION_PENALTY: f64 = 10.0;

/// Starting score for the consistency dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyMode {
    /// Base score 80.
    #[default]
    Standard,
    /// Base score 100; only detected problems lower it.
    Strict,
}

impl ConsistencyMode {
    pub fn base_score(&self) -> f64 {
        match self {
            ConsistencyMode::Standard => STANDARD_BASE,
            ConsistencyMode::Strict => STRICT_BASE,
        }
    }
}

impl std::str::FromStr for ConsistencyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Unknown consistency mode: {}", s)),
        }
    }
}

struct AntonymPair {
    label: &'static str,
    first: Regex,
    second: Regex,
}

impl AntonymPair {
    fn new(label: &'static str, first: &str, second: &str) -> Self {
        Self {
            label,
            first: word_regex(first),
            second: word_regex(second),
        }
    }

    fn co_occurs(&self, sentence: &str) -> bool {
        self.first.is_match(sentence) && self.second.is_match(sentence)
    }
}

fn word_regex(alternation: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b({})\b", alternation)).expect("valid antonym regex")
}

static ANTONYM_PAIRS: LazyLock<Vec<AntonymPair>> = LazyLock::new(|| {
    vec![
        AntonymPair::new("high vs low", "high", "low"),
        AntonymPair::new(
            "increase vs decrease",
            "increas(e|es|ed|ing)",
            "decreas(e|es|ed|ing)",
        ),
        AntonymPair::new("growth vs decline", "grow(th|ing|s)?", "declin(e|es|ed|ing)"),
        AntonymPair::new("rising vs falling", "ris(e|es|ing)", "fall(s|ing)?"),
        AntonymPair::new("strong vs weak", "strong(er|ly)?", "weak(er|ly)?"),
        AntonymPair::new("positive vs negative", "positive", "negative"),
        AntonymPair::new("success vs failure", "success(ful)?", "fail(ure|ed|s)?"),
        AntonymPair::new("advantage vs disadvantage", "advantages?", "disadvantages?"),
    ]
});

static CONCLUSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(conclusion|concluding|in conclusion|summary|summari[sz]e|to sum up|overall|key takeaways?|bottom line)\b",
    )
    .expect("valid conclusion regex")
});

fn sentences(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Antonym pairs that co-occur within a single sentence.
pub fn detect_contradictions(content: &str) -> Vec<&'static str> {
    ANTONYM_PAIRS
        .iter()
        .filter(|pair| sentences(content).any(|sentence| pair.co_occurs(sentence)))
        .map(|pair| pair.label)
        .collect()
}

pub fn has_conclusion(content: &str) -> bool {
    CONCLUSION_RE.is_match(content)
}

pub fn evaluate(content: &str, mode: ConsistencyMode) -> QualityDimension {
    let mut score = mode.base_score();
    let mut issues = Vec::new();

    let contradictions = detect_contradictions(content);
    for label in &contradictions {
        score -= CONTRADICTION_PENALTY;
        issues.push(format!("Potential contradiction: {}", label));
    }

    if !has_conclusion(content) {
        score -= MISSING_CONCLUSION_PENALTY;
        issues.push("No concluding or summary section found".to_string());
    }

    QualityDimension::new(
        DimensionKind::LogicalConsistency,
        score,
        format!(
            "{} potential contradiction(s) detected",
            contradictions.len()
        ),
        issues,
    )
}

pub struct LogicalConsistencyEvaluator {
    mode: ConsistencyMode,
}

impl LogicalConsistencyEvaluator {
    pub fn new(mode: ConsistencyMode) -> Self {
        Self { mode }
    }
}

impl DimensionEvaluator for LogicalConsistencyEvaluator {
    fn kind(&self) -> DimensionKind {
        DimensionKind::LogicalConsistency
    }

    fn evaluate(&self, input: &EvaluationInput) -> QualityDimension {
        evaluate(&input.content, self.mode)
    }
}
