//! In-memory TTL caches: a generic store plus whole-assessment memoization.

pub mod assessment;
pub mod clock;
pub mod ttl;
pub mod types;

#[cfg(test)]
mod ttl_tests;

pub use assessment::{AssessmentCache, AssessmentKey};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ttl::TtlCache;
pub use types::{CacheEntry, CacheStatus};
