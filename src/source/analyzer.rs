use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::constants::{
    DEFAULT_DOMAIN_TTL, DEFAULT_MAX_CACHE_ENTRIES, RECOMMENDED_SOURCE_COUNT, clamp_score,
};

use super::authority::domain_authority;
use super::types::{
    DomainCacheMode, FactorKind, ReliabilityCategory, ReliabilityFactor, ReliabilityScore, Source,
    SourceSetEvaluation,
};

const CONTENT_TYPE_BASE: f64 = 50.0;
const ACADEMIC_BASE: f64 = 30.0;

const LOW_RELIABILITY_MEAN: f64 = 60.0;
const MIN_HIGH_QUALITY_RATIO: f64 = 0.30;

/// Title/snippet keywords and the points they add to (or remove from) the content-type factor.
const CONTENT_TYPE_SIGNALS: &[(&str, f64)] = &[
    ("peer-reviewed", 20.0),
    ("journal", 15.0),
    ("study", 15.0),
    ("research", 15.0),
    ("analysis", 10.0),
    ("report", 10.0),
    ("statistics", 10.0),
    ("survey", 10.0),
    ("whitepaper", 10.0),
    ("data", 5.0),
    ("sponsored", -25.0),
    ("advertisement", -25.0),
    ("forum", -20.0),
    ("rumor", -20.0),
    ("blog", -15.0),
    ("opinion", -15.0),
    ("press release", -10.0),
];

static DOI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b10\.\d{4,9}/\S+|\bdoi\b|doi\.org)").expect("valid DOI regex")
});

static ARXIV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(arxiv\.org|\barxiv:?\s*\d{4}\.\d{4,5})").expect("valid arXiv regex")
});

static PEER_REVIEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpeer[- ]?review(ed)?\b").expect("valid peer-review regex"));

static VENUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(journal|proceedings|conference|symposium)\b").expect("valid venue regex")
});

static ET_AL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bet al\.?").expect("valid et-al regex"));

/// (pattern, points, label) for the academic factor.
fn academic_signals() -> [(&'static LazyLock<Regex>, f64, &'static str); 5] {
    [
        (&DOI_RE, 30.0, "DOI"),
        (&ARXIV_RE, 25.0, "arXiv"),
        (&PEER_REVIEW_RE, 25.0, "peer review"),
        (&VENUE_RE, 10.0, "publication venue"),
        (&ET_AL_RE, 10.0, "author citation"),
    ]
}

/// Settings for [`SourceReliabilityAnalyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub caching_enabled: bool,
    pub cache_mode: DomainCacheMode,
    pub ttl: Duration,
    pub capacity: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            caching_enabled: true,
            cache_mode: DomainCacheMode::default(),
            ttl: DEFAULT_DOMAIN_TTL,
            capacity: DEFAULT_MAX_CACHE_ENTRIES,
        }
    }
}

impl AnalyzerConfig {
    pub fn uncached() -> Self {
        Self {
            caching_enabled: false,
            ..Default::default()
        }
    }
}

enum DomainCache {
    Disabled,
    Composite(TtlCache<String, ReliabilityScore>),
    AuthorityOnly(TtlCache<String, f64>),
}

/// Scores sources from domain, content-type, and academic heuristics.
///
/// Per-domain results are memoized for the configured TTL; see [`DomainCacheMode`]
/// for what is cached.
pub struct SourceReliabilityAnalyzer {
    cache: DomainCache,
}

impl SourceReliabilityAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AnalyzerConfig, clock: Arc<dyn Clock>) -> Self {
        let cache = match (config.caching_enabled, config.cache_mode) {
            (false, _) => DomainCache::Disabled,
            (true, DomainCacheMode::Composite) => DomainCache::Composite(TtlCache::with_clock(
                config.ttl,
                config.capacity,
                clock,
            )),
            (true, DomainCacheMode::AuthorityOnly) => DomainCache::AuthorityOnly(
                TtlCache::with_clock(config.ttl, config.capacity, clock),
            ),
        };
        Self { cache }
    }

    /// Analyzer without any memoization.
    pub fn uncached() -> Self {
        Self::new(AnalyzerConfig::uncached())
    }

    /// Scores one source in `[0, 100]`.
    pub fn analyze_source(&self, source: &Source) -> ReliabilityScore {
        let domain = source.normalized_domain();

        match &self.cache {
            DomainCache::Disabled => {
                let authority = Self::authority_factor(&domain);
                Self::compose(authority, source)
            }
            DomainCache::Composite(cache) => {
                if let Some(cached) = cache.get(&domain) {
                    debug!(domain = %domain, "Domain reliability cache hit");
                    return cached;
                }
                let authority = Self::authority_factor(&domain);
                let score = Self::compose(authority, source);
                cache.set(domain, score.clone(), None);
                score
            }
            DomainCache::AuthorityOnly(cache) => {
                let authority = match cache.get(&domain) {
                    Some(score) => ReliabilityFactor {
                        kind: FactorKind::DomainAuthority,
                        score,
                        description: format!("Cached authority for {}", domain),
                    },
                    None => {
                        let factor = Self::authority_factor(&domain);
                        cache.set(domain, factor.score, None);
                        factor
                    }
                };
                Self::compose(authority, source)
            }
        }
    }

    /// Aggregates a source list: mean reliability, high-quality count, and advice.
    pub fn evaluate_source_set(&self, sources: &[Source]) -> SourceSetEvaluation {
        let scores: Vec<ReliabilityScore> =
            sources.iter().map(|s| self.analyze_source(s)).collect();

        let overall_reliability = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64
        };

        let high_quality_sources = scores.iter().filter(|s| s.is_high_quality()).count();
        let high_quality_ratio = if scores.is_empty() {
            0.0
        } else {
            high_quality_sources as f64 / scores.len() as f64
        };

        let mut recommendations = Vec::new();
        if overall_reliability < LOW_RELIABILITY_MEAN {
            recommendations.push(
                "Average source reliability is low; prefer academic, government, or established press sources"
                    .to_string(),
            );
        }
        if high_quality_ratio < MIN_HIGH_QUALITY_RATIO {
            recommendations.push(
                "Fewer than 30% of sources are high-reliability; add peer-reviewed or official sources"
                    .to_string(),
            );
        }
        if sources.len() < RECOMMENDED_SOURCE_COUNT {
            recommendations.push(format!(
                "Use at least {} independent sources (found {})",
                RECOMMENDED_SOURCE_COUNT,
                sources.len()
            ));
        }

        debug!(
            sources = sources.len(),
            overall_reliability, high_quality_sources, "Evaluated source set"
        );

        SourceSetEvaluation {
            overall_reliability,
            high_quality_sources,
            recommendations,
            scores,
        }
    }

    /// Sweeps expired domain entries. Returns the number removed.
    pub fn cleanup(&self) -> usize {
        match &self.cache {
            DomainCache::Disabled => 0,
            DomainCache::Composite(cache) => cache.cleanup(),
            DomainCache::AuthorityOnly(cache) => cache.cleanup(),
        }
    }

    pub fn clear(&self) {
        match &self.cache {
            DomainCache::Disabled => {}
            DomainCache::Composite(cache) => cache.clear(),
            DomainCache::AuthorityOnly(cache) => cache.clear(),
        }
    }

    /// Number of memoized domains (eventually consistent).
    pub fn cached_domains(&self) -> u64 {
        match &self.cache {
            DomainCache::Disabled => 0,
            DomainCache::Composite(cache) => {
                cache.run_pending_tasks();
                cache.len()
            }
            DomainCache::AuthorityOnly(cache) => {
                cache.run_pending_tasks();
                cache.len()
            }
        }
    }

    pub fn is_caching(&self) -> bool {
        !matches!(self.cache, DomainCache::Disabled)
    }

    fn compose(authority: ReliabilityFactor, source: &Source) -> ReliabilityScore {
        let text = source.searchable_text();
        let factors = vec![
            authority,
            Self::content_type_factor(&text),
            Self::academic_factor(&text, &source.uri),
        ];

        let score = clamp_score(
            factors
                .iter()
                .map(|f| clamp_score(f.score) * f.kind.weight())
                .sum(),
        )
        .round();

        ReliabilityScore {
            score,
            category: ReliabilityCategory::from_score(score),
            factors,
        }
    }

    fn authority_factor(domain: &str) -> ReliabilityFactor {
        let authority = domain_authority(domain);
        ReliabilityFactor {
            kind: FactorKind::DomainAuthority,
            score: authority.score,
            description: format!("{} ({})", authority.tier.as_str(), domain),
        }
    }

    fn content_type_factor(text: &str) -> ReliabilityFactor {
        let matched: Vec<&(&str, f64)> = CONTENT_TYPE_SIGNALS
            .iter()
            .filter(|(keyword, _)| text.contains(keyword))
            .collect();

        let score = clamp_score(CONTENT_TYPE_BASE + matched.iter().map(|(_, pts)| pts).sum::<f64>());
        let description = if matched.is_empty() {
            "No content-type signals".to_string()
        } else {
            let keywords: Vec<&str> = matched.iter().map(|(k, _)| *k).collect();
            format!("Content-type signals: {}", keywords.join(", "))
        };

        ReliabilityFactor {
            kind: FactorKind::ContentType,
            score,
            description,
        }
    }

    fn academic_factor(text: &str, uri: &str) -> ReliabilityFactor {
        let mut score = ACADEMIC_BASE;
        let mut labels = Vec::new();
        for (pattern, points, label) in academic_signals() {
            if pattern.is_match(text) || pattern.is_match(uri) {
                score += points;
                labels.push(label);
            }
        }

        let description = if labels.is_empty() {
            "No academic signals".to_string()
        } else {
            format!("Academic signals: {}", labels.join(", "))
        };

        ReliabilityFactor {
            kind: FactorKind::Academic,
            score: clamp_score(score),
            description,
        }
    }
}

impl Default for SourceReliabilityAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl std::fmt::Debug for SourceReliabilityAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.cache {
            DomainCache::Disabled => "disabled",
            DomainCache::Composite(_) => "composite",
            DomainCache::AuthorityOnly(_) => "authority_only",
        };
        f.debug_struct("SourceReliabilityAnalyzer")
            .field("cache", &mode)
            .finish()
    }
}
