//! Least Recently Used (LRU) segment.
//!
//! [`LruSegment`] is the state guarded by the structural mutex of
//! [`ConcurrentLruCache`](crate::ConcurrentLruCache): the recency list plus the
//! current capacity. It knows nothing about the concurrent key index or the usage
//! counters; the cache keeps those in step with every change made here while it
//! still holds the lock.
//!
//! # Algorithm
//!
//! Entries are ordered from most recently used (front) to least recently used
//! (back). Inserting or accessing an entry moves it to the front. When room is
//! needed, entries are taken from the back until the length is within the limit.
//! Both `put` and `set_capacity` go through [`LruSegment::evict_over`], so the
//! victim is always the back of the list.
//!
//! # Performance Characteristics
//!
//! - Insert, promote, remove, evict one: O(1)
//! - Shrinking the capacity by `n`: O(n)
//! - Snapshot: O(len)

use crate::entry::Handle;
use crate::list::{Iter, RecencyList};
use core::fmt;

/// Upper bound on arena slots reserved up front, so that a very large capacity
/// does not allocate memory the cache may never use.
const MAX_PREALLOCATED_SLOTS: usize = 4096;

pub(crate) struct LruSegment<K, V> {
    capacity: usize,
    list: RecencyList<K, V>,
}

impl<K, V> LruSegment<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        LruSegment {
            capacity,
            list: RecencyList::with_capacity(capacity.min(MAX_PREALLOCATED_SLOTS)),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn set_cap(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns true if `handle` still names the entry it was issued for.
    #[inline]
    pub(crate) fn is_live(&self, handle: Handle) -> bool {
        self.list.contains(handle)
    }

    /// Value behind `handle` without changing recency.
    pub(crate) fn peek(&self, handle: Handle) -> Option<&V> {
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// Promotes the entry to most recently used. Returns `true` if the order
    /// actually changed.
    #[inline]
    pub(crate) fn touch(&mut self, handle: Handle) -> bool {
        self.list.move_to_front(handle)
    }

    /// Mutable access to the value behind `handle` without changing recency.
    pub(crate) fn value_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.list.get_mut(handle).map(|entry| &mut entry.value)
    }

    /// Swaps in a new value for a live entry and promotes it. Hands the value
    /// back if the handle is stale.
    pub(crate) fn replace(&mut self, handle: Handle, value: V) -> Result<V, V> {
        let old = self.list.update(handle, value)?;
        self.list.move_to_front(handle);
        Ok(old)
    }

    /// Inserts a new most recently used entry. The caller makes room first.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Handle {
        self.list.add(key, value)
    }

    /// Appends a new least recently used entry.
    pub(crate) fn append(&mut self, key: K, value: V) -> Handle {
        self.list.add_last(key, value)
    }

    pub(crate) fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        self.list.remove(handle)
    }

    /// Takes the least recently used entry if the segment holds more than
    /// `limit` entries. This is the only eviction primitive: callers loop on it
    /// until it returns `None`.
    pub(crate) fn evict_over(&mut self, limit: usize) -> Option<(K, V)> {
        if self.list.len() > limit {
            self.list.remove_last()
        } else {
            None
        }
    }

    pub(crate) fn clear(&mut self) {
        self.list.clear();
    }

    /// Entries from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }
}

impl<K, V> fmt::Debug for LruSegment<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}
