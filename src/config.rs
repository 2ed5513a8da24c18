//! Cache Configuration Module
//!
//! Configuration structs have public fields for simple instantiation and a
//! `validate()` method that the cache constructors run before building anything.
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`ConcurrentLruCache`](crate::ConcurrentLruCache) | Thread-safe LRU |
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::ConcurrentLruCache;
//!
//! let config = LruCacheConfig {
//!     capacity: 1000,
//!     index_shards: None,
//! };
//! let cache: ConcurrentLruCache<String, i32> = ConcurrentLruCache::init(config, None)?;
//! # Ok::<(), recency_cache::CacheError>(())
//! ```

pub mod lru;

pub use lru::LruCacheConfig;
