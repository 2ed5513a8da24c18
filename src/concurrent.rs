//! Concurrent Cache Implementations
//!
//! Thread-safe caches meant to be shared behind an `Arc`.
//!
//! # Architecture
//!
//! [`ConcurrentLruCache`] keeps one global recency order. Its structure is split in
//! two parts that always describe the same set of entries:
//!
//! - a concurrent key index (`dashmap::DashMap`) answering "is this key here, and
//!   where" without the structural lock, and
//! - an arena-backed recency list behind a single `parking_lot::Mutex`, which
//!   every structural change and every traversal goes through.
//!
//! There is no lock striping of the recency list. One critical section
//! covering both the index updates and the list avoids any lock ordering between
//! them, at the cost of serializing writers. Critical sections are O(1) except for
//! snapshots and capacity shrinks, which are bounded by the capacity.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Every successful `get()` moves the entry to the front of the recency list, so a
//! read that hits is a write to the list. An `RwLock` would hand out the write side
//! on every hit anyway. The read-only part of a lookup is served by the index
//! instead, which has its own sharded locking and never waits on the mutex.
//!
//! # Example
//!
//! ```
//! use recency_cache::concurrent::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1000)?);
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key_{}_{}", t, i);
//!                 cache.put(key.clone(), i);
//!                 let _ = cache.get(&key);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! # Ok::<(), recency_cache::CacheError>(())
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
