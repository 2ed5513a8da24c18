//! Cache Metrics System
//!
//! Two layers:
//!
//! - [`CacheStats`]: four independent atomic counters (hits, misses, evictions,
//!   requests) bumped on the hot path without taking the cache's structural lock.
//! - [`CacheMetrics`]: a reporting trait returning metrics as a `BTreeMap`, so
//!   output has a deterministic key order for logs, tests and comparisons.
//!
//! # Consistency
//!
//! Counters are incremented independently with relaxed ordering. A
//! [`StatsSnapshot`] reads each counter once, so under concurrent load the four
//! fields can be slightly skewed relative to each other (for example `requests`
//! may briefly lag `hits + misses`). Every counter is individually monotonic and
//! eventually consistent. Statistics are for observability only; the cache never
//! consults them to make decisions.

use std::collections::BTreeMap;

pub mod lru;
pub mod stats;

pub use lru::LruCacheMetrics;
pub use stats::{CacheStats, StatsSnapshot};

/// Trait that caches implement for metrics reporting.
///
/// The `BTreeMap` return type keeps metric names sorted so that repeated reports
/// line up key for key.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. `"ConcurrentLRU"`).
    fn algorithm_name(&self) -> &'static str;
}
