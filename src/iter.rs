//! Fail-fast snapshot iteration.
//!
//! [`EntryIter`] is created by
//! [`ConcurrentLruCache::entry_iter`](crate::ConcurrentLruCache::entry_iter). It owns
//! a copy of every `(key, value)` pair, taken in most-to-least recently used order
//! while the structural lock was held, together with the cache's mutation counter
//! at that moment.
//!
//! The copied pairs never change. What the iterator guards against is *using* the
//! copy after the cache has moved on: every access compares the live mutation
//! counter with the captured one and fails with
//! [`CacheError::ConcurrentModification`] on mismatch. The check is lazy, so a
//! mutation is only reported on the next access after it happened.

use crate::error::{CacheError, Result};
use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::vec;

/// Fail-fast iterator over a point-in-time copy of the cache's entries.
///
/// Used as an [`Iterator`], it yields `Ok((key, value))` pairs until the copy is
/// exhausted. If the cache has been structurally modified since the iterator was
/// created, it yields a single `Err(CacheError::ConcurrentModification)` and then
/// stops. [`has_next`](Self::has_next) and [`try_next`](Self::try_next) keep
/// reporting the error on every call.
///
/// # Example
///
/// ```
/// use recency_cache::{CacheError, ConcurrentLruCache};
///
/// let cache = ConcurrentLruCache::new(4)?;
/// cache.put(1, "a");
/// cache.put(2, "b");
///
/// let mut iter = cache.entry_iter();
/// assert_eq!(iter.try_next()?, Some((2, "b")));
///
/// cache.put(3, "c");
/// assert!(matches!(
///     iter.try_next(),
///     Err(CacheError::ConcurrentModification { .. })
/// ));
/// # Ok::<(), CacheError>(())
/// ```
pub struct EntryIter<'a, K, V> {
    mutations: &'a AtomicU64,
    expected: u64,
    entries: vec::IntoIter<(K, V)>,
    failed: bool,
}

impl<'a, K, V> EntryIter<'a, K, V> {
    pub(crate) fn new(mutations: &'a AtomicU64, expected: u64, entries: Vec<(K, V)>) -> Self {
        EntryIter {
            mutations,
            expected,
            entries: entries.into_iter(),
            failed: false,
        }
    }

    fn check(&self) -> Result<()> {
        let found = self.mutations.load(Ordering::Acquire);
        if found == self.expected {
            Ok(())
        } else {
            Err(CacheError::ConcurrentModification {
                expected: self.expected,
                found,
            })
        }
    }

    /// Returns whether another pair is available, failing if the cache changed.
    pub fn has_next(&self) -> Result<bool> {
        self.check()?;
        Ok(!self.entries.as_slice().is_empty())
    }

    /// Returns the next pair, `Ok(None)` at the end, or an error if the cache changed.
    pub fn try_next(&mut self) -> Result<Option<(K, V)>> {
        self.check()?;
        Ok(self.entries.next())
    }

    /// Number of pairs not yet returned.
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> Iterator for EntryIter<'_, K, V> {
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.try_next() {
            Ok(pair) => pair.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<K, V> fmt::Debug for EntryIter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryIter")
            .field("expected", &self.expected)
            .field("remaining", &self.entries.len())
            .field("failed", &self.failed)
            .finish()
    }
}
