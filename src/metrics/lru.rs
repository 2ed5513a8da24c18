//! LRU Cache Metrics
//!
//! Report type for the concurrent LRU cache: the usage counters plus the
//! occupancy figures taken at the same moment.

use super::{CacheMetrics, StatsSnapshot};
use std::collections::BTreeMap;

/// LRU metrics report.
#[derive(Debug, Clone, Copy)]
pub struct LruCacheMetrics {
    /// Usage counters at report time.
    pub stats: StatsSnapshot,
    /// Configured capacity at report time.
    pub capacity: usize,
    /// Number of live entries at report time.
    pub len: usize,
}

impl LruCacheMetrics {
    /// Fraction of the capacity currently occupied.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.len as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts the report to a `BTreeMap` with stable key order.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.stats.hits as f64);
        metrics.insert("cache_misses".to_string(), self.stats.misses as f64);
        metrics.insert("evictions".to_string(), self.stats.evictions as f64);
        metrics.insert("requests".to_string(), self.stats.requests as f64);

        metrics.insert("hit_rate".to_string(), self.stats.hit_rate());
        metrics.insert("miss_rate".to_string(), self.stats.miss_rate());

        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("len".to_string(), self.len as f64);
        metrics.insert("cache_utilization".to_string(), self.utilization());

        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}
