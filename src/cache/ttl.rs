//! Generic expiring key/value store.
//!
//! Entries live in a bounded `moka` cache (size-based eviction past `capacity`) and
//! carry their own TTL, checked against the injected [`Clock`]. Expiry is lazy on
//! reads; [`TtlCache::cleanup`] sweeps everything that has expired.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use super::clock::{Clock, SystemClock};
use super::types::CacheEntry;

/// Thread-safe TTL cache.
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entries: Cache<K, CacheEntry<V>>,
    default_ttl: Duration,
    capacity: u64,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache backed by the system clock.
    pub fn new(default_ttl: Duration, capacity: u64) -> Self {
        Self::with_clock(default_ttl, capacity, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock.
    pub fn with_clock(default_ttl: Duration, capacity: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
            default_ttl,
            capacity,
            clock,
        }
    }

    /// Stores `value` under `key`, using `ttl` or the default TTL.
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        let entry = CacheEntry::new(value, self.clock.now(), ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key, entry);
    }

    /// Returns the value if present and not expired. Expired entries are removed.
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(self.clock.now()) {
            self.entries.invalidate(key);
            return None;
        }
        Some(entry.value)
    }

    /// Returns `true` if a live entry exists. Expired entries are removed.
    pub fn has(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Time remaining before `key` expires.
    pub fn remaining_ttl(&self, key: &K) -> Option<Duration> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.remaining(now))
    }

    /// Removes an entry, returning its value if it was still live.
    pub fn remove(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .remove(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now();
        let expired: Vec<Arc<K>> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key)
            .collect();

        for key in &expired {
            self.entries.invalidate(key.as_ref());
        }
        self.entries.run_pending_tasks();
        expired.len()
    }

    /// Number of stored entries, including expired ones not yet swept.
    ///
    /// Eventually consistent; call [`run_pending_tasks`](Self::run_pending_tasks) first
    /// for an exact count.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Returns `true` if the key is physically stored, expired or not.
    #[inline]
    pub fn contains_raw(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    #[inline]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.entry_count())
            .field("default_ttl", &self.default_ttl)
            .field("capacity", &self.capacity)
            .finish()
    }
}
