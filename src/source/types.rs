use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_RELIABILITY_THRESHOLD, MEDIUM_RELIABILITY_THRESHOLD};

/// A web source the analysed content was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Source {
    pub fn new(uri: impl Into<String>, title: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            domain: domain.into(),
            snippet: None,
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Normalized domain: the explicit `domain`, or the host parsed from `uri`.
    pub fn normalized_domain(&self) -> String {
        let raw = if self.domain.trim().is_empty() {
            host_from_uri(&self.uri)
        } else {
            self.domain.as_str()
        };
        normalize_domain(raw)
    }

    /// Lower-cased title and snippet, joined for keyword matching.
    pub fn searchable_text(&self) -> String {
        let mut text = self.title.to_lowercase();
        if let Some(snippet) = &self.snippet {
            text.push(' ');
            text.push_str(&snippet.to_lowercase());
        }
        text
    }
}

/// Lower-cases, trims, and strips a leading `www.` and trailing `.`.
pub fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_lowercase();
    let stripped = lowered.strip_prefix("www.").unwrap_or(&lowered);
    stripped.trim_end_matches('.').to_string()
}

fn host_from_uri(uri: &str) -> &str {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host.split(':').next().unwrap_or(host)
}

/// Which heuristic a [`ReliabilityFactor`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    DomainAuthority,
    ContentType,
    Academic,
}

impl FactorKind {
    /// Contribution of this factor to the composite score.
    #[inline]
    pub fn weight(&self) -> f64 {
        match self {
            FactorKind::DomainAuthority => 0.40,
            FactorKind::ContentType => 0.30,
            FactorKind::Academic => 0.30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityFactor {
    #[serde(rename = "type")]
    pub kind: FactorKind,
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityCategory {
    High,
    Medium,
    Low,
}

impl ReliabilityCategory {
    /// High at 75 and above, medium at 50 and above.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RELIABILITY_THRESHOLD {
            ReliabilityCategory::High
        } else if score >= MEDIUM_RELIABILITY_THRESHOLD {
            ReliabilityCategory::Medium
        } else {
            ReliabilityCategory::Low
        }
    }
}

/// Reliability of one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityScore {
    pub score: f64,
    pub factors: Vec<ReliabilityFactor>,
    pub category: ReliabilityCategory,
}

impl ReliabilityScore {
    #[inline]
    pub fn is_high_quality(&self) -> bool {
        self.category == ReliabilityCategory::High
    }
}

/// Aggregate reliability of a source list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSetEvaluation {
    pub overall_reliability: f64,
    pub high_quality_sources: usize,
    pub recommendations: Vec<String>,
    #[serde(skip)]
    pub scores: Vec<ReliabilityScore>,
}

/// What the analyzer memoizes per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainCacheMode {
    /// Cache the whole composite score per domain. Later sources on the same domain
    /// reuse it even when their title or snippet differ.
    #[default]
    Composite,
    /// Cache only the domain-authority sub-score; content heuristics always run.
    AuthorityOnly,
}

impl std::str::FromStr for DomainCacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "composite" => Ok(Self::Composite),
            "authority" | "authority_only" => Ok(Self::AuthorityOnly),
            _ => Err(format!("Unknown domain cache mode: {}", s)),
        }
    }
}
