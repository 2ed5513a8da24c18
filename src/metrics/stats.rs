//! Lock-free usage counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic usage counters shared by all threads using a cache.
///
/// Each counter is its own `AtomicU64`; no counter is ever decremented or reset
/// for the lifetime of the cache. `clear()` on the cache leaves them untouched.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    requests: AtomicU64,
}

impl CacheStats {
    /// Creates a set of counters, all zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found a live entry.
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found nothing, or found an entry that was gone by
    /// the time it could be promoted.
    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one capacity-driven eviction.
    #[inline]
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads every counter once. Fields may be skewed relative to each other
    /// under concurrent load.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that found no live entry.
    pub misses: u64,
    /// Entries dropped to respect the capacity.
    pub evictions: u64,
    /// Total lookups (hits plus misses).
    pub requests: u64,
}

impl StatsSnapshot {
    /// Fraction of requests that were hits, or 0.0 before the first request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of requests that were misses, or 0.0 before the first request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.misses as f64 / self.requests as f64
        } else {
            0.0
        }
    }
}
