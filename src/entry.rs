//! Arena entries for the recency list.
//!
//! An [`Entry`] stores a key, its value and the arena indices of its neighbours in
//! recency order. Entries never hold references to each other: every link is an
//! index into the [`RecencyList`](crate::list::RecencyList) slot vector, which owns
//! all entries. The concurrent index refers to entries through a [`Handle`].
//!
//! # Handles and generations
//!
//! A slot is reused once its entry is removed. To tell a live entry apart from a
//! later occupant of the same slot, every allocation stamps the slot with a fresh
//! generation number. A [`Handle`] carries both the slot index and the generation
//! it was issued with, so a stale handle never resolves to the wrong entry.
//!
//! ```text
//!   Handle { slot: 3, generation: 17 }
//!                 │
//!                 ▼
//!   slots: [ .. ][ .. ][ .. ][ gen 17 | Entry { key, value, prev, next } ][ .. ]
//! ```

/// Stable reference to an entry in the recency arena.
///
/// Two handles are equal only when they name the same slot *and* the same
/// occupant of that slot, which is the identity check `get` relies on after it
/// re-acquires the structural lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    pub(crate) slot: usize,
    pub(crate) generation: u64,
}

/// A cached key-value pair plus its recency links.
///
/// `prev` points towards the most recently used end, `next` towards the least
/// recently used end. `None` marks the list boundary.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<K, V> Entry<K, V> {
    /// Creates an unlinked entry.
    pub(crate) fn new(key: K, value: V) -> Self {
        Entry {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Consumes the entry, returning its key and value.
    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// One arena cell. Vacant slots keep their last generation so that the next
/// occupant can be stamped with a newer one.
#[derive(Debug)]
pub(crate) struct Slot<K, V> {
    pub(crate) generation: u64,
    pub(crate) entry: Option<Entry<K, V>>,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn occupied(generation: u64, entry: Entry<K, V>) -> Self {
        Slot {
            generation,
            entry: Some(entry),
        }
    }

    /// Returns the entry if this slot is occupied by the given generation.
    #[inline]
    pub(crate) fn get(&self, generation: u64) -> Option<&Entry<K, V>> {
        if self.generation == generation {
            self.entry.as_ref()
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, generation: u64) -> Option<&mut Entry<K, V>> {
        if self.generation == generation {
            self.entry.as_mut()
        } else {
            None
        }
    }
}
