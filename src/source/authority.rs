//! Tiered domain-authority lookup.
//!
//! Tiers are checked in a fixed priority order and the first match wins, so a
//! university press listed as academic scores as academic even though it also
//! looks like a university domain.

pub const GOVERNMENT_SCORE: f64 = 85.0;
pub const REPUTABLE_PRESS_SCORE: f64 = 75.0;
pub const UNIVERSITY_SCORE: f64 = 80.0;
pub const RESEARCH_SCORE: f64 = 70.0;
pub const DEFAULT_AUTHORITY_SCORE: f64 = 50.0;

/// Curated academic publishers and indexes, with per-domain scores (all >= 90).
const ACADEMIC_DOMAINS: &[(&str, f64)] = &[
    ("nature.com", 98.0),
    ("science.org", 98.0),
    ("cell.com", 96.0),
    ("thelancet.com", 96.0),
    ("nejm.org", 96.0),
    ("pnas.org", 95.0),
    ("ieee.org", 95.0),
    ("acm.org", 95.0),
    ("springer.com", 93.0),
    ("sciencedirect.com", 93.0),
    ("wiley.com", 92.0),
    ("jstor.org", 92.0),
    ("ncbi.nlm.nih.gov", 95.0),
    ("pubmed.ncbi.nlm.nih.gov", 95.0),
    ("plos.org", 92.0),
    ("arxiv.org", 90.0),
    ("biorxiv.org", 90.0),
    ("ssrn.com", 90.0),
    ("scholar.google.com", 90.0),
];

const GOVERNMENT_DOMAINS: &[&str] = &[
    "europa.eu",
    "who.int",
    "un.org",
    "oecd.org",
    "worldbank.org",
    "imf.org",
];

const GOVERNMENT_SUFFIXES: &[&str] = &[".gov", ".mil", ".gov.uk", ".gov.au", ".gc.ca", ".gouv.fr"];

const REPUTABLE_PRESS_DOMAINS: &[&str] = &[
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "bbc.co.uk",
    "nytimes.com",
    "wsj.com",
    "ft.com",
    "economist.com",
    "bloomberg.com",
    "theguardian.com",
    "washingtonpost.com",
    "npr.org",
    "technologyreview.com",
    "wired.com",
    "arstechnica.com",
];

const UNIVERSITY_SUFFIXES: &[&str] = &[".edu", ".ac.uk", ".ac.jp", ".edu.au", ".ac.in", ".ac.nz"];
const UNIVERSITY_MARKERS: &[&str] = &["university", "univ.", "college"];

const RESEARCH_MARKERS: &[&str] = &["research", "institute", "lab", "science"];

/// Authority tier a domain resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorityTier {
    Academic,
    Government,
    ReputablePress,
    University,
    Research,
    Unknown,
}

impl AuthorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityTier::Academic => "academic publisher",
            AuthorityTier::Government => "government",
            AuthorityTier::ReputablePress => "reputable press",
            AuthorityTier::University => "university",
            AuthorityTier::Research => "research organization",
            AuthorityTier::Unknown => "unrecognized domain",
        }
    }
}

/// Result of an authority lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainAuthority {
    pub tier: AuthorityTier,
    pub score: f64,
}

/// `true` if `domain` equals `listed` or is a subdomain of it.
#[inline]
fn matches_domain(domain: &str, listed: &str) -> bool {
    domain == listed
        || domain
            .strip_suffix(listed)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[inline]
fn has_suffix(domain: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| {
        domain.ends_with(suffix) || domain == suffix.trim_start_matches('.')
    })
}

/// Resolves a normalized domain to its authority tier and score.
pub fn domain_authority(domain: &str) -> DomainAuthority {
    if let Some(&(_, score)) = ACADEMIC_DOMAINS
        .iter()
        .find(|(listed, _)| matches_domain(domain, listed))
    {
        return DomainAuthority {
            tier: AuthorityTier::Academic,
            score,
        };
    }

    if GOVERNMENT_DOMAINS.iter().any(|listed| matches_domain(domain, listed))
        || has_suffix(domain, GOVERNMENT_SUFFIXES)
    {
        return DomainAuthority {
            tier: AuthorityTier::Government,
            score: GOVERNMENT_SCORE,
        };
    }

    if REPUTABLE_PRESS_DOMAINS
        .iter()
        .any(|listed| matches_domain(domain, listed))
    {
        return DomainAuthority {
            tier: AuthorityTier::ReputablePress,
            score: REPUTABLE_PRESS_SCORE,
        };
    }

    if has_suffix(domain, UNIVERSITY_SUFFIXES)
        || UNIVERSITY_MARKERS.iter().any(|marker| domain.contains(marker))
    {
        return DomainAuthority {
            tier: AuthorityTier::University,
            score: UNIVERSITY_SCORE,
        };
    }

    if RESEARCH_MARKERS.iter().any(|marker| domain.contains(marker)) {
        return DomainAuthority {
            tier: AuthorityTier::Research,
            score: RESEARCH_SCORE,
        };
    }

    DomainAuthority {
        tier: AuthorityTier::Unknown,
        score: DEFAULT_AUTHORITY_SCORE,
    }
}
