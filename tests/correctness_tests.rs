//! Correctness Tests for the Concurrent LRU Cache
//!
//! Validates recency ordering, eviction choice, statistics and the fail-fast
//! snapshot iterator with small, deterministic access patterns. Each eviction test
//! checks exactly which key left the cache.

use recency_cache::config::LruCacheConfig;
use recency_cache::{CacheError, CacheMetrics, ConcurrentLruCache, StatsSnapshot};

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

/// Helper to create a cache with the given capacity
fn make_lru<K: std::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> ConcurrentLruCache<K, V> {
    ConcurrentLruCache::init(LruCacheConfig::new(cap), None).unwrap()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_zero_capacity_is_invalid() {
    let result: Result<ConcurrentLruCache<u32, u32>, _> = ConcurrentLruCache::new(0);
    assert!(matches!(result, Err(CacheError::InvalidArgument(_))));

    let result: Result<ConcurrentLruCache<u32, u32>, _> =
        ConcurrentLruCache::init(LruCacheConfig::new(0), None);
    assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
}

#[test]
fn test_invalid_shard_count_is_invalid() {
    let config = LruCacheConfig::new(10).with_index_shards(3);
    let result: Result<ConcurrentLruCache<u32, u32>, _> = ConcurrentLruCache::init(config, None);
    assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
}

#[test]
fn test_capacity_one() {
    let cache = make_lru(1);
    cache.put("a", 1);
    cache.put("b", 2);
    assert_eq!(cache.keys_snapshot(), vec!["b"]);
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.stats().evictions, 1);
}

// ============================================================================
// EVICTION ORDER
// ============================================================================

#[test]
fn test_lru_evicts_least_recent() {
    let cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);

    assert!(!cache.contains_key(&1), "key 1 was least recently used");
    assert!(cache.contains_key(&2));
    assert!(cache.contains_key(&3));
    assert_eq!(cache.len(), 2);
    assert!(cache.stats().evictions >= 1);
}

#[test]
fn test_get_protects_from_eviction() {
    let cache = make_lru(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    assert_eq!(cache.get(&"a"), Some(1));

    cache.put("d", 4);
    assert!(!cache.contains_key(&"b"), "b became least recently used");
    assert_eq!(cache.keys_snapshot(), vec!["d", "a", "c"]);

    cache.put("e", 5);
    assert!(!cache.contains_key(&"c"));
    assert_eq!(cache.keys_snapshot(), vec!["e", "d", "a"]);
}

#[test]
fn test_update_moves_to_front_without_eviction() {
    let cache = make_lru(3);
    cache.put(1, "one");
    cache.put(2, "two");
    cache.put(3, "three");

    assert_eq!(cache.put(1, "uno"), Some("one"));
    assert_eq!(cache.keys_snapshot(), vec![1, 3, 2]);
    assert_eq!(cache.stats().evictions, 0);
    assert_eq!(cache.peek(&1), Some("uno"));
}

#[test]
fn test_remove_frees_room() {
    let cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    assert_eq!(cache.remove(&1), Some(1));
    assert_eq!(cache.remove(&1), None);

    cache.put(3, 3);
    assert_eq!(cache.keys_snapshot(), vec![3, 2]);
    assert_eq!(cache.stats().evictions, 0);
}

#[test]
fn test_reinserted_key_starts_fresh() {
    let cache = make_lru(3);
    cache.put(1, 10);
    cache.put(2, 20);
    cache.remove(&1);
    cache.put(1, 10);
    cache.put(3, 30);

    assert_eq!(cache.keys_snapshot(), vec![3, 1, 2]);
    cache.put(4, 40);
    assert!(!cache.contains_key(&2));
}

#[test]
fn test_peek_and_contains_do_not_promote() {
    let cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.peek(&1);
    cache.contains_key(&1);

    cache.put(3, 3);
    assert!(!cache.contains_key(&1));
}

// ============================================================================
// RESIZING
// ============================================================================

#[test]
fn test_shrink_evicts_from_lru_end() {
    let cache = make_lru(4);
    for i in 1..=4 {
        cache.put(i, i);
    }
    cache.get(&1);

    cache.set_capacity(2).unwrap();
    assert_eq!(cache.keys_snapshot(), vec![1, 4]);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.capacity(), 2);
    assert_eq!(cache.stats().evictions, 2);

    cache.put(5, 5);
    assert_eq!(cache.keys_snapshot(), vec![5, 1]);
}

#[test]
fn test_grow_keeps_entries() {
    let cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.set_capacity(4).unwrap();
    cache.put(3, 3);
    cache.put(4, 4);

    assert_eq!(cache.len(), 4);
    assert_eq!(cache.stats().evictions, 0);
}

#[test]
fn test_resize_to_zero_leaves_cache_unchanged() {
    let cache = make_lru(3);
    cache.put(1, 1);
    cache.put(2, 2);

    assert!(matches!(
        cache.set_capacity(0),
        Err(CacheError::InvalidArgument(_))
    ));
    assert_eq!(cache.capacity(), 3);
    assert_eq!(cache.keys_snapshot(), vec![2, 1]);
}

// ============================================================================
// STATISTICS
// ============================================================================

#[test]
fn test_put_then_get_is_a_hit() {
    let cache = make_lru(4);
    cache.put("k", "v");
    assert_eq!(cache.get(&"k"), Some("v"));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.requests, 1);
}

#[test]
fn test_stats_and_rates() {
    let cache = make_lru(2);
    cache.put(1, 1);
    cache.get(&1);
    cache.get(&1);
    cache.get(&1);
    cache.get(&2);

    let stats = cache.stats();
    assert_eq!(
        stats,
        StatsSnapshot {
            hits: 3,
            misses: 1,
            evictions: 0,
            requests: 4,
        }
    );
    assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    assert!((stats.miss_rate() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn test_empty_stats_rates_are_zero() {
    let cache: ConcurrentLruCache<u32, u32> = make_lru(2);
    let stats = cache.stats();
    assert_eq!(stats.hit_rate(), 0.0);
    assert_eq!(stats.miss_rate(), 0.0);
}

#[test]
fn test_metrics_report() {
    let cache = make_lru(4);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.get(&1);

    let metrics = cache.metrics();
    assert_eq!(metrics["cache_hits"], 1.0);
    assert_eq!(metrics["len"], 2.0);
    assert_eq!(metrics["cache_utilization"], 0.5);
    assert_eq!(cache.algorithm_name(), "ConcurrentLRU");
}

// ============================================================================
// FAIL-FAST ITERATION
// ============================================================================

#[test]
fn test_iterator_yields_mru_to_lru() {
    let cache = make_lru(3);
    cache.put(1, 'a');
    cache.put(2, 'b');
    cache.put(3, 'c');
    cache.get(&1);

    let iter = cache.entry_iter();
    assert_eq!(iter.remaining(), 3);
    let pairs: Result<Vec<_>, _> = iter.collect();
    assert_eq!(pairs.unwrap(), vec![(1, 'a'), (3, 'c'), (2, 'b')]);
}

#[test]
fn test_iterator_fails_after_put() {
    let cache = make_lru(4);
    cache.put(1, 1);
    let mut iter = cache.entry_iter();

    cache.put(2, 2);
    assert!(matches!(
        iter.has_next(),
        Err(CacheError::ConcurrentModification { .. })
    ));
    assert!(matches!(
        iter.next(),
        Some(Err(CacheError::ConcurrentModification { .. }))
    ));
    assert!(iter.next().is_none(), "iterator fuses after the error");
}

#[test]
fn test_iterator_fails_after_each_structural_change() {
    fn put_new(c: &Cache) {
        c.put(9, 9);
    }
    fn put_update(c: &Cache) {
        c.put(1, 100);
    }
    fn promote(c: &Cache) {
        c.get(&1);
    }
    fn remove(c: &Cache) {
        c.remove(&2);
    }
    fn clear(c: &Cache) {
        c.clear();
    }
    fn shrink(c: &Cache) {
        c.set_capacity(1).unwrap();
    }
    fn update_in_place(c: &Cache) {
        c.get_mut_with(&2, |v| *v += 1);
    }

    type Cache = ConcurrentLruCache<u32, u32>;
    let cases: [(&str, fn(&Cache)); 7] = [
        ("put new", put_new),
        ("put update", put_update),
        ("promote", promote),
        ("remove", remove),
        ("clear", clear),
        ("shrink", shrink),
        ("update in place", update_in_place),
    ];

    for (name, mutate) in cases {
        let cache = make_lru(3);
        cache.put(1, 1);
        cache.put(2, 2);
        let mut iter = cache.entry_iter();
        mutate(&cache);
        assert!(
            matches!(
                iter.try_next(),
                Err(CacheError::ConcurrentModification { .. })
            ),
            "{name} should invalidate the iterator"
        );
    }
}

#[test]
fn test_iterator_survives_lookups_that_do_not_reorder() {
    let cache = make_lru(3);
    cache.put(1, 1);
    cache.put(2, 2);
    let iter = cache.entry_iter();

    cache.get(&2);
    cache.get(&42);
    cache.peek(&1);
    cache.stats();
    cache.keys_snapshot();

    assert_eq!(iter.filter_map(Result::ok).count(), 2);
}

#[test]
fn test_clear_then_reuse() {
    let cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.keys_snapshot().is_empty());
    cache.put(3, 3);
    cache.put(4, 4);
    cache.put(5, 5);
    assert_eq!(cache.keys_snapshot(), vec![5, 4]);
}
