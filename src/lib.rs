#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Operation | Lock | Recency | Statistics |
//! |-----------|------|---------|------------|
//! | [`get`](ConcurrentLruCache::get) | index first, mutex to promote | promotes | hit / miss |
//! | [`put`](ConcurrentLruCache::put) | mutex | promotes / inserts at MRU | evictions |
//! | [`remove`](ConcurrentLruCache::remove) | mutex | unlinks | - |
//! | [`contains_key`](ConcurrentLruCache::contains_key) | index only | - | - |
//! | [`peek`](ConcurrentLruCache::peek) | mutex | - | - |
//! | [`set_capacity`](ConcurrentLruCache::set_capacity) | mutex | evicts from LRU end | evictions |
//! | [`keys_snapshot`](ConcurrentLruCache::keys_snapshot) | mutex | - | - |
//! | [`entry_iter`](ConcurrentLruCache::entry_iter) | mutex for the copy | - | - |
//! | [`stats`](ConcurrentLruCache::stats) | none | - | - |
//!
//! ## Basic Usage
//!
//! ```rust
//! use recency_cache::ConcurrentLruCache;
//!
//! let cache = ConcurrentLruCache::new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! assert_eq!(cache.keys_snapshot(), vec!["c", "a"]);
//! # Ok::<(), recency_cache::CacheError>(())
//! ```
//!
//! ## Live Resizing
//!
//! ```rust
//! use recency_cache::ConcurrentLruCache;
//!
//! let cache = ConcurrentLruCache::new(4)?;
//! for i in 0..4 {
//!     cache.put(i, i * 10);
//! }
//! cache.set_capacity(2)?;            // evicts 0 and 1
//! assert_eq!(cache.keys_snapshot(), vec![3, 2]);
//! assert_eq!(cache.stats().evictions, 2);
//! # Ok::<(), recency_cache::CacheError>(())
//! ```
//!
//! ## Fail-Fast Snapshots
//!
//! ```rust
//! use recency_cache::{CacheError, ConcurrentLruCache};
//!
//! let cache = ConcurrentLruCache::new(4)?;
//! cache.put(1, "one");
//! let mut iter = cache.entry_iter();
//! cache.put(2, "two");
//! assert!(matches!(iter.next(), Some(Err(CacheError::ConcurrentModification { .. }))));
//! # Ok::<(), CacheError>(())
//! ```
//!
//! ## Modules
//!
//! - [`concurrent`]: the thread-safe LRU cache
//! - [`config`]: configuration structures
//! - [`metrics`]: usage counters and metrics reporting
//! - [`persist`]: order-preserving binary persistence
//! - [`iter`]: the fail-fast snapshot iterator
//! - [`error`]: error types

/// Arena entries and handles.
///
/// Provides the `Entry<K, V>` record (key, value, recency links) and the
/// generation-stamped `Handle` used by the key index.
pub(crate) mod entry;

/// Arena-backed doubly linked recency list.
///
/// Internal infrastructure: links are slot indices, removal frees a slot for
/// reuse. Use the cache types instead.
pub(crate) mod list;

/// Recency segment guarded by the cache's structural mutex.
pub(crate) mod lru;

/// Cache configuration structures.
pub mod config;

/// Error types and the crate `Result` alias.
pub mod error;

/// Fail-fast snapshot iterator.
pub mod iter;

/// Cache metrics system.
///
/// Lock-free usage counters and a `BTreeMap`-based reporting trait.
pub mod metrics;

/// Concurrent cache implementations.
///
/// Provides [`ConcurrentLruCache`], a thread-safe LRU cache with a lock-free key
/// index and a single structural mutex.
pub mod concurrent;

/// Order-preserving binary persistence.
pub mod persist;

pub use concurrent::ConcurrentLruCache;
pub use config::LruCacheConfig;
pub use error::{CacheError, Result};
pub use iter::EntryIter;
pub use metrics::{CacheMetrics, StatsSnapshot};
