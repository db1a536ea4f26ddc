use std::sync::Arc;
use std::time::Duration;

use super::analyzer::{AnalyzerConfig, SourceReliabilityAnalyzer};
use super::authority::{AuthorityTier, domain_authority};
use super::types::{DomainCacheMode, FactorKind, ReliabilityCategory, Source, normalize_domain};
use crate::cache::ManualClock;

fn source(domain: &str, title: &str) -> Source {
    Source::new(format!("https://{}/article", domain), title, domain)
}

#[test]
fn test_normalize_domain() {
    assert_eq!(normalize_domain("  WWW.Nature.com. "), "nature.com");
    assert_eq!(normalize_domain("arxiv.org"), "arxiv.org");
}

#[test]
fn test_domain_derived_from_uri() {
    let s = Source::new("https://user@www.Reuters.com:443/markets?id=1", "Markets", "");
    assert_eq!(s.normalized_domain(), "reuters.com");

    let bare = Source::new("example.org/path", "Example", "");
    assert_eq!(bare.normalized_domain(), "example.org");
}

#[test]
fn test_authority_tiers() {
    assert_eq!(domain_authority("nature.com").tier, AuthorityTier::Academic);
    assert!(domain_authority("nature.com").score >= 90.0);
    assert!(domain_authority("arxiv.org").score >= 90.0);
    assert_eq!(domain_authority("energy.gov").score, 85.0);
    assert_eq!(domain_authority("data.gov.uk").tier, AuthorityTier::Government);
    assert_eq!(domain_authority("reuters.com").score, 75.0);
    assert_eq!(domain_authority("cs.stanford.edu").score, 80.0);
    assert_eq!(domain_authority("oxford.ac.uk").tier, AuthorityTier::University);
    assert_eq!(domain_authority("batteryresearch.org").score, 70.0);
    assert_eq!(domain_authority("openlab.io").tier, AuthorityTier::Research);
    assert_eq!(domain_authority("openlab.io").score, 70.0);
    assert_eq!(domain_authority("cloudlabs.dev").score, 70.0);
    assert_eq!(domain_authority("randomblog.net").score, 50.0);
}

#[test]
fn test_authority_subdomains_match_but_lookalikes_do_not() {
    assert_eq!(domain_authority("spectrum.ieee.org").tier, AuthorityTier::Academic);
    assert_eq!(domain_authority("notnature.com").tier, AuthorityTier::Unknown);
}

#[test]
fn test_authority_first_matching_tier_wins() {
    // Academic publisher also contains a research marker.
    assert_eq!(domain_authority("sciencedirect.com").tier, AuthorityTier::Academic);
    // University marker outranks research marker.
    assert_eq!(
        domain_authority("university-research.org").tier,
        AuthorityTier::University
    );
}

#[test]
fn test_analyze_source_weights_factors() {
    let analyzer = SourceReliabilityAnalyzer::uncached();
    let score = analyzer.analyze_source(&source("randomblog.net", "Thoughts"));

    // 50*0.4 + 50*0.3 + 30*0.3
    assert_eq!(score.score, 44.0);
    assert_eq!(score.category, ReliabilityCategory::Low);
    assert_eq!(score.factors.len(), 3);
    assert_eq!(score.factors[0].kind, FactorKind::DomainAuthority);
    assert_eq!(score.factors[1].kind, FactorKind::ContentType);
    assert_eq!(score.factors[2].kind, FactorKind::Academic);
}

#[test]
fn test_analyze_academic_source_is_high() {
    let analyzer = SourceReliabilityAnalyzer::uncached();
    let s = source("nature.com", "Peer-reviewed study of solid-state batteries")
        .with_snippet("Published in the journal, doi 10.1038/s41586-024-00001-1, Smith et al.");
    let score = analyzer.analyze_source(&s);

    assert_eq!(score.category, ReliabilityCategory::High);
    assert!(score.score <= 100.0);
    assert!(score.factors[2].description.contains("DOI"));
}

#[test]
fn test_negative_content_signals_lower_score() {
    let analyzer = SourceReliabilityAnalyzer::uncached();
    let neutral = analyzer.analyze_source(&source("example.com", "Battery news"));
    let sponsored = analyzer.analyze_source(&source("example.com", "Sponsored blog opinion"));

    assert!(sponsored.score < neutral.score);
    assert_eq!(sponsored.factors[1].score, 0.0);
}

#[test]
fn test_category_thresholds() {
    assert_eq!(ReliabilityCategory::from_score(75.0), ReliabilityCategory::High);
    assert_eq!(ReliabilityCategory::from_score(74.9), ReliabilityCategory::Medium);
    assert_eq!(ReliabilityCategory::from_score(50.0), ReliabilityCategory::Medium);
    assert_eq!(ReliabilityCategory::from_score(49.9), ReliabilityCategory::Low);
}

#[test]
fn test_evaluate_empty_source_set() {
    let analyzer = SourceReliabilityAnalyzer::uncached();
    let eval = analyzer.evaluate_source_set(&[]);

    assert_eq!(eval.overall_reliability, 0.0);
    assert_eq!(eval.high_quality_sources, 0);
    assert!(!eval.recommendations.is_empty());
}

#[test]
fn test_evaluate_source_set_is_mean_of_scores() {
    let analyzer = SourceReliabilityAnalyzer::uncached();
    let sources = vec![
        source("nature.com", "Journal study"),
        source("reuters.com", "Market report"),
        source("randomblog.net", "Opinion"),
    ];

    let expected: f64 = sources
        .iter()
        .map(|s| analyzer.analyze_source(s).score)
        .sum::<f64>()
        / sources.len() as f64;

    let eval = analyzer.evaluate_source_set(&sources);
    assert_eq!(eval.overall_reliability, expected);
    assert_eq!(eval.scores.len(), 3);
}

#[test]
fn test_evaluate_source_set_recommendation_rules() {
    let analyzer = SourceReliabilityAnalyzer::uncached();
    let strong = source("nature.com", "Peer-reviewed journal study")
        .with_snippet("doi 10.1000/xyz123, Lee et al., conference proceedings");
    let sources = vec![strong.clone(), strong.clone(), strong];

    let eval = analyzer.evaluate_source_set(&sources);
    assert_eq!(eval.high_quality_sources, 3);
    assert!(eval.recommendations.is_empty());

    let eval = analyzer.evaluate_source_set(&[source("randomblog.net", "Rumor")]);
    assert_eq!(eval.recommendations.len(), 3);
}

#[test]
fn test_composite_cache_reuses_score_for_same_domain() {
    let analyzer = SourceReliabilityAnalyzer::new(AnalyzerConfig::default());

    let first = analyzer.analyze_source(&source("example.com", "Peer-reviewed journal study"));
    let second = analyzer.analyze_source(&source("example.com", "Sponsored blog"));

    assert_eq!(first, second);
    assert_eq!(analyzer.cached_domains(), 1);
}

#[test]
fn test_authority_only_cache_rescores_content() {
    let config = AnalyzerConfig {
        cache_mode: DomainCacheMode::AuthorityOnly,
        ..Default::default()
    };
    let analyzer = SourceReliabilityAnalyzer::new(config);

    let first = analyzer.analyze_source(&source("example.com", "Peer-reviewed journal study"));
    let second = analyzer.analyze_source(&source("example.com", "Sponsored blog"));

    assert!(first.score > second.score);
    assert_eq!(analyzer.cached_domains(), 1);
    assert!(second.factors[0].description.contains("Cached"));
}

#[test]
fn test_uncached_analyzer_stores_nothing() {
    let analyzer = SourceReliabilityAnalyzer::uncached();
    analyzer.analyze_source(&source("example.com", "Study"));

    assert!(!analyzer.is_caching());
    assert_eq!(analyzer.cached_domains(), 0);
    assert_eq!(analyzer.cleanup(), 0);
}

#[test]
fn test_domain_cache_expires() {
    let clock = Arc::new(ManualClock::new());
    let config = AnalyzerConfig {
        ttl: Duration::from_secs(60),
        ..Default::default()
    };
    let analyzer = SourceReliabilityAnalyzer::with_clock(config, clock.clone());

    let first = analyzer.analyze_source(&source("example.com", "Peer-reviewed journal study"));
    clock.advance(Duration::from_secs(61));
    let second = analyzer.analyze_source(&source("example.com", "Sponsored blog"));

    assert_ne!(first, second);
}

#[test]
fn test_cleanup_sweeps_expired_domains() {
    let clock = Arc::new(ManualClock::new());
    let config = AnalyzerConfig {
        ttl: Duration::from_secs(10),
        ..Default::default()
    };
    let analyzer = SourceReliabilityAnalyzer::with_clock(config, clock.clone());

    analyzer.analyze_source(&source("a.com", "A"));
    analyzer.analyze_source(&source("b.com", "B"));
    clock.advance(Duration::from_secs(11));

    assert_eq!(analyzer.cleanup(), 2);
    assert_eq!(analyzer.cached_domains(), 0);
}
