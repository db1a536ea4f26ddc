use std::sync::Arc;
use std::time::Duration;

use super::clock::{Clock, ManualClock};
use super::ttl::TtlCache;
use super::types::{CacheEntry, CacheStatus};

fn cache_with_clock(ttl_secs: u64) -> (TtlCache<String, u32>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), 100, clock.clone());
    (cache, clock)
}

#[test]
fn test_set_then_get_within_ttl() {
    let (cache, clock) = cache_with_clock(60);

    cache.set("k".to_string(), 7, None);
    clock.advance(Duration::from_secs(59));

    assert_eq!(cache.get(&"k".to_string()), Some(7));
    assert!(cache.has(&"k".to_string()));
}

#[test]
fn test_entry_at_exact_ttl_is_still_live() {
    let (cache, clock) = cache_with_clock(60);

    cache.set("k".to_string(), 7, None);
    clock.advance(Duration::from_secs(60));

    assert_eq!(cache.get(&"k".to_string()), Some(7));
}

#[test]
fn test_get_after_ttl_is_absent_and_evicts() {
    let (cache, clock) = cache_with_clock(60);

    cache.set("k".to_string(), 7, None);
    clock.advance(Duration::from_secs(61));

    assert!(cache.contains_raw(&"k".to_string()));
    assert_eq!(cache.get(&"k".to_string()), None);
    assert!(!cache.contains_raw(&"k".to_string()));
}

#[test]
fn test_per_entry_ttl_override() {
    let (cache, clock) = cache_with_clock(60);

    cache.set("short".to_string(), 1, Some(Duration::from_secs(5)));
    cache.set("long".to_string(), 2, None);
    clock.advance(Duration::from_secs(6));

    assert!(!cache.has(&"short".to_string()));
    assert!(cache.has(&"long".to_string()));
}

#[test]
fn test_cleanup_removes_only_expired_entries() {
    let (cache, clock) = cache_with_clock(60);

    cache.set("old-1".to_string(), 1, None);
    cache.set("old-2".to_string(), 2, None);
    clock.advance(Duration::from_secs(30));
    cache.set("fresh".to_string(), 3, None);
    clock.advance(Duration::from_secs(31));

    let removed = cache.cleanup();

    assert_eq!(removed, 2);
    assert!(!cache.contains_raw(&"old-1".to_string()));
    assert!(!cache.contains_raw(&"old-2".to_string()));
    assert_eq!(cache.get(&"fresh".to_string()), Some(3));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cleanup_on_fresh_cache_is_noop() {
    let (cache, _clock) = cache_with_clock(60);
    cache.set("k".to_string(), 1, None);

    assert_eq!(cache.cleanup(), 0);
    assert!(cache.has(&"k".to_string()));
}

#[test]
fn test_overwrite_resets_timestamp() {
    let (cache, clock) = cache_with_clock(10);

    cache.set("k".to_string(), 1, None);
    clock.advance(Duration::from_secs(8));
    cache.set("k".to_string(), 2, None);
    clock.advance(Duration::from_secs(8));

    assert_eq!(cache.get(&"k".to_string()), Some(2));
}

#[test]
fn test_clear_removes_everything() {
    let (cache, _clock) = cache_with_clock(60);
    cache.set("a".to_string(), 1, None);
    cache.set("b".to_string(), 2, None);

    cache.clear();

    assert!(cache.is_empty());
    assert!(!cache.has(&"a".to_string()));
}

#[test]
fn test_remove_returns_live_value_only() {
    let (cache, clock) = cache_with_clock(10);
    cache.set("live".to_string(), 1, None);
    cache.set("stale".to_string(), 2, Some(Duration::from_secs(1)));
    clock.advance(Duration::from_secs(2));

    assert_eq!(cache.remove(&"live".to_string()), Some(1));
    assert_eq!(cache.remove(&"stale".to_string()), None);
    assert_eq!(cache.remove(&"missing".to_string()), None);
}

#[test]
fn test_remaining_ttl() {
    let (cache, clock) = cache_with_clock(10);
    cache.set("k".to_string(), 1, None);
    clock.advance(Duration::from_secs(4));

    assert_eq!(cache.remaining_ttl(&"k".to_string()), Some(Duration::from_secs(6)));

    clock.advance(Duration::from_secs(7));
    assert_eq!(cache.remaining_ttl(&"k".to_string()), None);
}

#[test]
fn test_capacity_bounds_entry_count() {
    let cache: TtlCache<u32, u32> = TtlCache::new(Duration::from_secs(60), 10);

    for i in 0..200 {
        cache.set(i, i, None);
    }
    cache.run_pending_tasks();

    assert!(cache.len() <= 10);
    assert_eq!(cache.capacity(), 10);
}

#[test]
fn test_concurrent_access() {
    let cache: Arc<TtlCache<u32, u32>> = Arc::new(TtlCache::new(Duration::from_secs(60), 1_000));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..100 {
                    cache.set(t * 100 + i, i, None);
                    let _ = cache.get(&(t * 100 + i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    cache.run_pending_tasks();
    assert_eq!(cache.len(), 400);
}

#[test]
fn test_cache_entry_expiry_boundary() {
    let clock = ManualClock::new();
    let entry = CacheEntry::new("v", clock.now(), Duration::from_secs(5));

    clock.advance(Duration::from_secs(5));
    assert!(!entry.is_expired(clock.now()));

    clock.advance(Duration::from_millis(1));
    assert!(entry.is_expired(clock.now()));
}

#[test]
fn test_cache_status() {
    assert!(CacheStatus::Hit.is_hit());
    assert!(!CacheStatus::Miss.is_hit());
    assert_eq!(CacheStatus::Disabled.to_string(), "DISABLED");
}
