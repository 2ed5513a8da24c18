//! Configuration for the concurrent LRU cache.
//!
//! # Sizing Guidelines
//!
//! - **`capacity`**: The maximum number of live entries. The cache never holds more
//!   than this many entries once an operation returns. It can be changed later with
//!   [`set_capacity`](crate::ConcurrentLruCache::set_capacity).
//! - **`index_shards`**: Shard count of the concurrent key index. Lookups hash into
//!   one shard, so more shards mean fewer readers sharing a shard lock. Leave it at
//!   `None` to let the index pick a default based on available parallelism.
//!
//! Shards only partition the *index*. Recency order is global and all structural
//! changes serialize on a single mutex regardless of this setting.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::ConcurrentLruCache;
//!
//! let config = LruCacheConfig {
//!     capacity: 10_000,
//!     index_shards: Some(64),
//! };
//! let cache: ConcurrentLruCache<String, Vec<u8>> = ConcurrentLruCache::init(config, None)?;
//! assert_eq!(cache.capacity(), 10_000);
//! # Ok::<(), recency_cache::CacheError>(())
//! ```

use crate::error::{CacheError, Result};
use core::fmt;

/// Configuration for a [`ConcurrentLruCache`](crate::ConcurrentLruCache).
///
/// # Fields
///
/// - `capacity`: Maximum number of entries. Must be greater than zero.
/// - `index_shards`: Optional shard count for the key index. When set it must be a
///   power of two greater than one.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
    /// Shard count for the concurrent key index, or `None` for the default.
    pub index_shards: Option<usize>,
}

impl LruCacheConfig {
    /// Creates a configuration with the given capacity and a default index.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            index_shards: None,
        }
    }

    /// Sets the shard count of the key index.
    #[must_use]
    pub fn with_index_shards(mut self, shards: usize) -> Self {
        self.index_shards = Some(shards);
        self
    }

    /// Checks the configuration, rejecting a zero capacity or an unusable shard count.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::invalid_argument(
                "capacity must be greater than zero",
            ));
        }
        if let Some(shards) = self.index_shards {
            if shards < 2 || !shards.is_power_of_two() {
                return Err(CacheError::invalid_argument(format!(
                    "index_shards must be a power of two greater than one, got {shards}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .field("index_shards", &self.index_shards)
            .finish()
    }
}
