//! Whole-result memoization for quality assessments.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::ttl::TtlCache;
use crate::hashing::{hash_assessment_key, hash_to_u64};
use crate::scoring::QualityAssessment;
use crate::source::Source;

/// 32-byte BLAKE3 digest of `(content prefix, sorted domains, subject)`.
pub type AssessmentKey = [u8; 32];

/// TTL cache of finished assessments.
///
/// Hits are returned unchanged with no re-validation against the inputs, so
/// correctness depends on the key alone.
pub struct AssessmentCache {
    entries: TtlCache<AssessmentKey, QualityAssessment>,
    prefix_chars: usize,
}

impl AssessmentCache {
    pub fn new(ttl: Duration, capacity: u64, prefix_chars: usize) -> Self {
        Self::with_clock(ttl, capacity, prefix_chars, Arc::new(SystemClock))
    }

    pub fn with_clock(
        ttl: Duration,
        capacity: u64,
        prefix_chars: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries: TtlCache::with_clock(ttl, capacity, clock),
            prefix_chars,
        }
    }

    /// Derives the cache key for an assessment request.
    pub fn key_for(&self, content: &str, sources: &[Source], subject: &str) -> AssessmentKey {
        let domains: Vec<String> = sources.iter().map(Source::normalized_domain).collect();
        hash_assessment_key(
            content,
            domains.iter().map(String::as_str),
            subject,
            self.prefix_chars,
        )
    }

    pub fn get(&self, key: &AssessmentKey) -> Option<QualityAssessment> {
        let hit = self.entries.get(key);
        debug!(
            key = %format_args!("{:016x}", hash_to_u64(key)),
            hit = hit.is_some(),
            "Assessment cache lookup"
        );
        hit
    }

    pub fn insert(&self, key: AssessmentKey, assessment: QualityAssessment) {
        self.entries.set(key, assessment, None);
    }

    pub fn cleanup(&self) -> usize {
        self.entries.cleanup()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.entries.default_ttl()
    }

    pub fn prefix_chars(&self) -> usize {
        self.prefix_chars
    }
}

impl std::fmt::Debug for AssessmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentCache")
            .field("entries", &self.entries)
            .field("prefix_chars", &self.prefix_chars)
            .finish()
    }
}
