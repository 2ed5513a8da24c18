//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache with strict global recency order. Structural changes
//! serialize on one mutex; plain lookups start without it.
//!
//! # How It Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                       ConcurrentLruCache                             │
//! │                                                                      │
//! │   ┌──────────────────────────┐     ┌──────────────────────────────┐  │
//! │   │ index: DashMap<K,Handle> │     │ segment: Mutex<LruSegment>   │  │
//! │   │  (sharded, lock-free for │────▶│  arena recency list          │  │
//! │   │   the structural mutex)  │     │  MRU ◀──────────────▶ LRU    │  │
//! │   └──────────────────────────┘     │  capacity                    │  │
//! │                                    └──────────────────────────────┘  │
//! │   stats: CacheStats (atomics)      mutations: AtomicU64              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the list always hold the same set of entries: every insertion,
//! removal and eviction updates both while the mutex is held. Readers that only
//! need to know whether a key is present ([`contains_key`]) consult the index and
//! never touch the mutex.
//!
//! ## Two-phase lookup
//!
//! [`get`] runs in two phases:
//!
//! 1. **Optimistic read.** Look the key up in the index without the mutex. A
//!    missing key is a miss and the call returns immediately.
//! 2. **Re-validate under the lock.** Acquire the mutex and check that the
//!    [`Handle`] seen in phase 1 still names a live entry. Between the two phases
//!    another thread may have evicted the entry, or removed and re-inserted the
//!    same key. Handles compare slot *and* generation, so only the exact entry seen
//!    in phase 1 passes, never a later entry that merely has an equal key or value.
//!    On success the entry is promoted to most recently used and counted as a hit;
//!    otherwise the call is a miss.
//!
//! ## Mutation counter
//!
//! Every structural change (insertion, in-place update, promotion that moves an
//! entry, removal, eviction, clear) bumps an atomic counter while the mutex is
//! held. [`entry_iter`] captures it alongside its snapshot and fails fast once it
//! moves.
//!
//! # Thread Safety
//!
//! `ConcurrentLruCache` is `Send + Sync` when its keys, values and hasher are, and
//! can be shared via `Arc`. No operation fails because of contention; threads only
//! wait for the mutex.
//!
//! [`get`]: ConcurrentLruCache::get
//! [`contains_key`]: ConcurrentLruCache::contains_key
//! [`entry_iter`]: ConcurrentLruCache::entry_iter

use crate::config::LruCacheConfig;
use crate::entry::Handle;
use crate::error::{CacheError, Result};
use crate::iter::EntryIter;
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, CacheStats, LruCacheMetrics, StatsSnapshot};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use dashmap::DashMap;
use log::{debug, trace, warn};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Upper bound on index buckets reserved up front.
const MAX_PREALLOCATED_INDEX: usize = 4096;

/// A thread-safe, fixed-capacity LRU cache.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type. Operations that hand values out by copy require `Clone`.
/// - `S`: Hash builder for the key index. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```
/// use recency_cache::ConcurrentLruCache;
/// use std::sync::Arc;
/// use std::thread;
///
/// let cache = Arc::new(ConcurrentLruCache::new(2)?);
/// cache.put(1, "one");
/// cache.put(2, "two");
///
/// let reader = Arc::clone(&cache);
/// thread::spawn(move || {
///     assert_eq!(reader.get(&1), Some("one"));
/// })
/// .join()
/// .unwrap();
///
/// // 1 was used more recently than 2, so 2 is evicted.
/// cache.put(3, "three");
/// assert_eq!(cache.keys_snapshot(), vec![3, 1]);
/// # Ok::<(), recency_cache::CacheError>(())
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    index: DashMap<K, Handle, S>,
    segment: Mutex<LruSegment<K, V>>,
    stats: CacheStats,
    mutations: AtomicU64,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::init(LruCacheConfig::new(capacity), None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] if the configuration does not
    /// [validate](LruCacheConfig::validate).
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Result<Self> {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Creates a cache with a custom hash builder for the key index.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] if the configuration does not
    /// [validate](LruCacheConfig::validate).
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Result<Self> {
        config.validate()?;
        let reserved = config.capacity.min(MAX_PREALLOCATED_INDEX);
        let index = match config.index_shards {
            Some(shards) => {
                DashMap::with_capacity_and_hasher_and_shard_amount(reserved, hash_builder, shards)
            }
            None => DashMap::with_capacity_and_hasher(reserved, hash_builder),
        };
        Ok(Self {
            index,
            segment: Mutex::new(LruSegment::new(config.capacity)),
            stats: CacheStats::new(),
            mutations: AtomicU64::new(0),
        })
    }

    /// Looks the key up in the index. The shard guard is released before returning.
    #[inline]
    fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key).map(|entry| *entry.value())
    }

    /// Must be called with the structural mutex held.
    #[inline]
    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::Release);
    }

    /// Evicts from the LRU end until at most `limit` entries remain, keeping the
    /// index and counters in step. Shared by `put` and `set_capacity`.
    fn evict_over(&self, segment: &mut LruSegment<K, V>, limit: usize) -> usize {
        let mut evicted = 0;
        while let Some((key, _value)) = segment.evict_over(limit) {
            self.index.remove(&key);
            self.stats.record_eviction();
            self.record_mutation();
            evicted += 1;
        }
        if evicted > 0 {
            trace!("evicted {evicted} least recently used entries to fit {limit}");
        }
        evicted
    }

    /// Looks up a key and applies `f` to its value while the lock is held.
    ///
    /// Follows the same two-phase protocol and counts the same hit or miss as
    /// [`get`](Self::get), but avoids cloning the value.
    ///
    /// # Example
    ///
    /// ```
    /// use recency_cache::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(8)?;
    /// cache.put("greeting".to_string(), "hello world".to_string());
    /// assert_eq!(cache.get_with("greeting", |v| v.len()), Some(11));
    /// # Ok::<(), recency_cache::CacheError>(())
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        // Phase 1: optimistic lookup without the structural lock.
        let Some(handle) = self.lookup(key) else {
            self.stats.record_miss();
            return None;
        };

        // Phase 2: only the exact entry seen above may be promoted.
        let mut segment = self.segment.lock();
        if !segment.is_live(handle) {
            drop(segment);
            trace!("entry left the cache between lookup and promotion");
            self.stats.record_miss();
            return None;
        }
        if segment.touch(handle) {
            self.record_mutation();
        }
        let result = segment.peek(handle).map(f);
        drop(segment);

        if result.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        result
    }

    /// Looks up a key and applies `f` to a mutable reference to its value.
    ///
    /// Counts as a hit or miss and promotes the entry like [`get`](Self::get).
    /// An in-place change invalidates outstanding snapshot iterators.
    ///
    /// # Example
    ///
    /// ```
    /// use recency_cache::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(8)?;
    /// cache.put("counter", 0);
    /// cache.get_mut_with(&"counter", |v| *v += 1);
    /// assert_eq!(cache.peek(&"counter"), Some(1));
    /// # Ok::<(), recency_cache::CacheError>(())
    /// ```
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        let Some(handle) = self.lookup(key) else {
            self.stats.record_miss();
            return None;
        };

        let mut segment = self.segment.lock();
        if !segment.is_live(handle) {
            drop(segment);
            self.stats.record_miss();
            return None;
        }
        segment.touch(handle);
        let result = segment.value_mut(handle).map(f);
        self.record_mutation();
        drop(segment);

        if result.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        result
    }

    /// Inserts or updates an entry, making it the most recently used.
    ///
    /// If the key is present its value is replaced in place and the previous
    /// value returned. Otherwise entries are evicted from the LRU end until there
    /// is room, *then* the new entry is inserted, so the capacity is never
    /// exceeded. Evicted entries are dropped silently.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let mut segment = self.segment.lock();

        let value = match self.lookup(&key) {
            Some(handle) => match segment.replace(handle, value) {
                Ok(previous) => {
                    self.record_mutation();
                    return Some(previous);
                }
                Err(value) => value,
            },
            None => value,
        };

        let limit = segment.cap() - 1;
        self.evict_over(&mut segment, limit);

        let handle = segment.insert(key.clone(), value);
        self.index.insert(key, handle);
        self.record_mutation();
        None
    }

    /// Removes an entry, returning its value if it was present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut segment = self.segment.lock();
        let (_, handle) = self.index.remove(key)?;
        let (_, value) = segment.remove(handle)?;
        self.record_mutation();
        Some(value)
    }

    /// Returns `true` if the key is present.
    ///
    /// Reads the index only: no lock, no promotion, no statistics. The answer can
    /// be stale by the time the caller acts on it.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Drops every entry. Statistics are left untouched.
    pub fn clear(&self) {
        let mut segment = self.segment.lock();
        let dropped = segment.len();
        self.index.clear();
        segment.clear();
        self.record_mutation();
        debug!("cleared {dropped} entries");
    }

    /// Returns the current capacity.
    pub fn capacity(&self) -> usize {
        self.segment.lock().cap()
    }

    /// Changes the capacity, evicting from the LRU end if the cache is now over it.
    ///
    /// Growing never evicts. Evictions are counted exactly as in [`put`](Self::put).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] if `capacity` is zero; the cache is
    /// left unchanged.
    pub fn set_capacity(&self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(CacheError::invalid_argument(
                "capacity must be greater than zero",
            ));
        }
        let mut segment = self.segment.lock();
        let previous = segment.cap();
        segment.set_cap(capacity);
        let evicted = self.evict_over(&mut segment, capacity);
        debug!("capacity changed from {previous} to {capacity}, evicted {evicted}");
        Ok(())
    }

    /// Returns the keys from most to least recently used, as of one instant.
    pub fn keys_snapshot(&self) -> Vec<K> {
        let segment = self.segment.lock();
        segment.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Returns the usage counters. Fields may be slightly skewed relative to each
    /// other under concurrent load; see [`metrics`](crate::metrics).
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Appends entries at the LRU end in the given order, skipping keys already
    /// present and stopping once the capacity is reached. Returns how many were
    /// appended.
    pub(crate) fn append_lru<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut segment = self.segment.lock();
        let mut appended = 0;
        for (key, value) in entries {
            if segment.len() >= segment.cap() {
                break;
            }
            if self.index.contains_key(&key) {
                warn!("skipping duplicate key while restoring entries");
                continue;
            }
            let handle = segment.append(key.clone(), value);
            self.index.insert(key, handle);
            appended += 1;
        }
        if appended > 0 {
            self.record_mutation();
        }
        appended
    }

    fn report(&self) -> LruCacheMetrics {
        let segment = self.segment.lock();
        LruCacheMetrics {
            stats: self.stats.snapshot(),
            capacity: segment.cap(),
            len: segment.len(),
        }
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Returns a copy of the value and promotes the entry to most recently used.
    ///
    /// A missing key is a miss, not an error. See the module documentation for
    /// the two-phase protocol.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_with(key, V::clone)
    }

    /// Returns a copy of the value without promoting it or touching statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let segment = self.segment.lock();
        let handle = self.lookup(key)?;
        segment.peek(handle).cloned()
    }

    /// Returns every `(key, value)` pair from most to least recently used, as of
    /// one instant.
    pub fn entries_snapshot(&self) -> Vec<(K, V)> {
        let segment = self.segment.lock();
        segment
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns a fail-fast iterator over a snapshot of the entries, most recently
    /// used first.
    ///
    /// The snapshot is taken under the lock together with the mutation counter.
    /// Any structural change made afterwards makes the next access on the
    /// iterator fail with [`CacheError::ConcurrentModification`].
    pub fn entry_iter(&self) -> EntryIter<'_, K, V> {
        let segment = self.segment.lock();
        let expected = self.mutations.load(Ordering::Acquire);
        let entries = segment
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        drop(segment);
        EntryIter::new(&self.mutations, expected, entries)
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.report().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segment = self.segment.lock();
        f.debug_struct("ConcurrentLruCache")
            .field("capacity", &segment.cap())
            .field("len", &segment.len())
            .field("mutations", &self.mutations.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn make_cache<K: Hash + Eq + Clone, V>(capacity: usize) -> ConcurrentLruCache<K, V> {
        ConcurrentLruCache::new(capacity).unwrap()
    }

    #[test]
    fn test_basic_operations() {
        let cache: ConcurrentLruCache<String, i32> = make_cache(100);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3);

        assert_eq!(cache.len(), 3);
        assert!(!cache.is_empty());
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
        assert_eq!(cache.get("d"), None);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result: Result<ConcurrentLruCache<u32, u32>> = ConcurrentLruCache::new(0);
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_put_returns_previous_value() {
        let cache = make_cache(2);
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.put("apple", 3), Some(1));
        assert_eq!(cache.get(&"apple"), Some(3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_update_promotes_entry() {
        let cache = make_cache(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.put("apple", 10);
        cache.put("cherry", 3);

        assert_eq!(cache.keys_snapshot(), vec!["cherry", "apple"]);
        assert!(!cache.contains_key(&"banana"));
    }

    #[test]
    fn test_eviction_takes_lru() {
        let cache = make_cache(2);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);

        assert!(!cache.contains_key(&1));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_remove() {
        let cache: ConcurrentLruCache<String, i32> = make_cache(100);
        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);

        assert_eq!(cache.remove("a"), Some(1));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove("nonexistent"), None);
    }

    #[test]
    fn test_clear_keeps_stats() {
        let cache = make_cache(4);
        cache.put(1, 1);
        cache.get(&1);
        cache.get(&2);
        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.contains_key(&1));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.requests, 2);

        cache.put(5, 5);
        assert_eq!(cache.get(&5), Some(5));
    }

    #[test]
    fn test_contains_key_has_no_side_effects() {
        let cache = make_cache(2);
        cache.put(1, "a");
        cache.put(2, "b");

        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&3));
        assert_eq!(cache.keys_snapshot(), vec![2, 1]);
        assert_eq!(cache.stats().requests, 0);
    }

    #[test]
    fn test_peek_has_no_side_effects() {
        let cache = make_cache(2);
        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.peek(&1), Some("a"));
        assert_eq!(cache.peek(&3), None);
        assert_eq!(cache.keys_snapshot(), vec![2, 1]);
        assert_eq!(cache.stats(), StatsSnapshot::default());
    }

    #[test]
    fn test_get_with_and_get_mut_with() {
        let cache: ConcurrentLruCache<String, String> = make_cache(4);
        cache.put("key".to_string(), "hello world".to_string());

        assert_eq!(cache.get_with("key", |v| v.len()), Some(11));
        assert_eq!(cache.get_with("missing", |v| v.len()), None);

        cache.get_mut_with("key", |v| v.push('!'));
        assert_eq!(cache.peek("key").as_deref(), Some("hello world!"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_set_capacity_shrinks_from_lru_end() {
        let cache = make_cache(5);
        for i in 0..5 {
            cache.put(i, i);
        }
        cache.get(&0);

        cache.set_capacity(2).unwrap();
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.keys_snapshot(), vec![0, 4]);
        assert_eq!(cache.stats().evictions, 3);

        cache.set_capacity(10).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 3);
    }

    #[test]
    fn test_set_capacity_rejects_zero() {
        let cache = make_cache(3);
        cache.put(1, 1);
        assert!(matches!(
            cache.set_capacity(0),
            Err(CacheError::InvalidArgument(_))
        ));
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stale_handle_is_a_miss() {
        let cache = make_cache(2);
        cache.put("k", 1);
        let stale = cache.lookup(&"k").unwrap();

        cache.remove(&"k");
        cache.put("k", 1);
        let fresh = cache.lookup(&"k").unwrap();

        assert_ne!(stale, fresh);
        let segment = cache.segment.lock();
        assert!(!segment.is_live(stale));
        assert!(segment.is_live(fresh));
    }

    #[test]
    fn test_entry_iter_fails_after_put() {
        let cache = make_cache(4);
        cache.put(1, "a");
        cache.put(2, "b");

        let mut iter = cache.entry_iter();
        assert_eq!(iter.try_next().unwrap(), Some((2, "b")));
        cache.put(3, "c");
        assert!(matches!(
            iter.try_next(),
            Err(CacheError::ConcurrentModification { .. })
        ));
    }

    #[test]
    fn test_entry_iter_survives_non_structural_calls() {
        let cache = make_cache(4);
        cache.put(1, "a");
        cache.put(2, "b");

        let iter = cache.entry_iter();
        // Reads that do not reorder anything leave the snapshot valid.
        cache.get(&2);
        cache.peek(&1);
        cache.contains_key(&1);
        cache.get(&99);
        let pairs: Vec<_> = iter.map(|pair| pair.unwrap()).collect();
        assert_eq!(pairs, vec![(2, "b"), (1, "a")]);
    }

    #[test]
    fn test_append_lru_restores_order() {
        let cache = make_cache(3);
        let appended = cache.append_lru(vec![(1, "a"), (3, "c"), (1, "dup"), (2, "b"), (4, "d")]);
        assert_eq!(appended, 3);
        assert_eq!(cache.keys_snapshot(), vec![1, 3, 2]);
        assert_eq!(cache.peek(&1), Some("a"));
        assert_eq!(cache.stats(), StatsSnapshot::default());
    }

    #[test]
    fn test_metrics() {
        let cache = make_cache(4);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"z");

        let metrics = cache.metrics();
        assert_eq!(metrics["cache_hits"], 1.0);
        assert_eq!(metrics["cache_misses"], 1.0);
        assert_eq!(metrics["requests"], 2.0);
        assert_eq!(metrics["len"], 2.0);
        assert_eq!(metrics["capacity"], 4.0);
        assert_eq!(cache.algorithm_name(), "ConcurrentLRU");
    }

    #[test]
    fn test_index_shards_config() {
        let config = LruCacheConfig::new(64).with_index_shards(8);
        let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::init(config, None).unwrap();
        cache.put(1, 1);
        assert_eq!(cache.get(&1), Some(1));
    }

    #[test]
    fn test_init_with_hasher() {
        let hasher = DefaultHashBuilder::default();
        let cache: ConcurrentLruCache<String, i32, _> =
            ConcurrentLruCache::init_with_hasher(LruCacheConfig::new(100), hasher).unwrap();
        cache.put("test".to_string(), 42);
        assert_eq!(cache.get("test"), Some(42));
    }

    #[test]
    fn test_debug_output() {
        let cache: ConcurrentLruCache<u32, u32> = make_cache(8);
        cache.put(1, 1);
        let debug = format!("{cache:?}");
        assert!(debug.contains("capacity: 8"));
        assert!(debug.contains("len: 1"));
    }

    #[test]
    fn test_concurrent_mixed_operations() {
        let cache: Arc<ConcurrentLruCache<String, usize>> = Arc::new(make_cache(100));
        let num_threads = 8;
        let ops_per_thread = 500;

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = format!("key_{}", i % 200);
                        match i % 4 {
                            0 => {
                                cache.put(key, i);
                            }
                            1 => {
                                let _ = cache.get(&key);
                            }
                            2 => {
                                cache.get_mut_with(&key, |v| *v += 1);
                            }
                            3 => {
                                let _ = cache.remove(&key);
                            }
                            _ => unreachable!(),
                        }
                        if i == 250 && t == 0 {
                            cache.clear();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 100);
        assert_eq!(cache.keys_snapshot().len(), cache.len());
    }
}
