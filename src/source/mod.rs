//! Per-source reliability scoring.
//!
//! A source's score is a weighted sum of three factors, each clamped to `[0, 100]`:
//! domain authority (40%), content-type keywords in title and snippet (30%), and
//! academic signals such as DOIs or arXiv identifiers (30%).
//!
//! # Domain Memoization
//!
//! Results are cached per normalized domain. In [`DomainCacheMode::Composite`] the
//! whole score is reused for every source on that domain until the entry expires,
//! so a second source on the same domain with a different title gets the first
//! source's composite. This trades accuracy for repeat-lookup speed;
//! [`DomainCacheMode::AuthorityOnly`] caches only the domain sub-score instead.

pub mod analyzer;
pub mod authority;
pub mod types;

#[cfg(test)]
mod tests;

pub use analyzer::{AnalyzerConfig, SourceReliabilityAnalyzer};
pub use authority::{AuthorityTier, DomainAuthority, domain_authority};
pub use types::{
    DomainCacheMode, FactorKind, ReliabilityCategory, ReliabilityFactor, ReliabilityScore, Source,
    SourceSetEvaluation, normalize_domain,
};
