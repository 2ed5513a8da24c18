//! Concurrent Cache Usage Examples
//!
//! Demonstrates multi-threaded usage patterns for the recency-cache LRU cache.
//!
//! Run with: cargo run --example concurrent_usage
//! Set `RUST_LOG=debug` to see capacity changes and persistence logs.

use recency_cache::config::LruCacheConfig;
use recency_cache::{persist, CacheError, CacheMetrics, ConcurrentLruCache};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() -> Result<(), CacheError> {
    env_logger::init();

    println!("=== Concurrent LRU Cache Examples ===\n");

    shared_cache()?;
    live_resize()?;
    fail_fast_snapshot()?;
    persistence()?;

    Ok(())
}

/// Several threads sharing one cache through an `Arc`
fn shared_cache() -> Result<(), CacheError> {
    println!("--- Shared cache ---");
    let config = LruCacheConfig::new(1_000).with_index_shards(16);
    let cache: Arc<ConcurrentLruCache<String, usize>> =
        Arc::new(ConcurrentLruCache::init(config, None)?);

    let start = Instant::now();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..5_000 {
                    let key = format!("user:{}", (t * 5_000 + i) % 2_000);
                    if cache.get(&key).is_none() {
                        cache.put(key, i);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker thread panicked");
        }
    }

    let stats = cache.stats();
    println!("elapsed:    {:?}", start.elapsed());
    println!("len:        {} / {}", cache.len(), cache.capacity());
    println!("hit rate:   {:.1}%", stats.hit_rate() * 100.0);
    println!("evictions:  {}", stats.evictions);
    for (name, value) in cache.metrics() {
        println!("  {name}: {value}");
    }
    println!();
    Ok(())
}

/// Shrinking a live cache evicts from the least recently used end
fn live_resize() -> Result<(), CacheError> {
    println!("--- Live resize ---");
    let cache = ConcurrentLruCache::new(5)?;
    for page in ["home", "about", "blog", "docs", "contact"] {
        cache.put(page, page.len());
    }
    cache.get(&"home");
    println!("before: {:?}", cache.keys_snapshot());

    cache.set_capacity(3)?;
    println!("after:  {:?}", cache.keys_snapshot());
    println!("evictions: {}\n", cache.stats().evictions);
    Ok(())
}

/// Snapshot iterators refuse to continue once the cache has changed
fn fail_fast_snapshot() -> Result<(), CacheError> {
    println!("--- Fail-fast snapshot ---");
    let cache = ConcurrentLruCache::new(4)?;
    cache.put(1, "one");
    cache.put(2, "two");

    let mut iter = cache.entry_iter();
    println!("first: {:?}", iter.try_next()?);
    cache.put(3, "three");
    match iter.try_next() {
        Err(err) => println!("after put: {err}"),
        Ok(item) => println!("after put: {item:?}"),
    }
    println!();
    Ok(())
}

/// Saving and restoring keeps the recency order but not the statistics
fn persistence() -> Result<(), CacheError> {
    println!("--- Persistence ---");
    let cache = ConcurrentLruCache::new(3)?;
    cache.put(1u32, "a".to_string());
    cache.put(2, "b".to_string());
    cache.put(3, "c".to_string());
    cache.get(&1);

    let mut buffer = Vec::new();
    let written = persist::save(&cache, &mut buffer)?;
    println!("saved {written} entries in {} bytes", buffer.len());

    let restored: ConcurrentLruCache<u32, String> =
        persist::load(&mut buffer.as_slice(), LruCacheConfig::new(3))?;
    println!("original order: {:?}", cache.keys_snapshot());
    println!("restored order: {:?}", restored.keys_snapshot());
    println!("restored stats: {:?}", restored.stats());
    Ok(())
}
