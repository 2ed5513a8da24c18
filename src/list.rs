use crate::entry::{Entry, Handle, Slot};
use core::fmt;
use core::mem;

/// A doubly linked recency list stored in a slot arena.
///
/// The list runs from the most recently used entry (`head`) to the least recently
/// used entry (`tail`). Links are slot indices rather than pointers, so the list
/// owns every entry outright and removal simply vacates a slot and pushes its
/// index onto the free list for reuse.
///
/// The list is not synchronized. The cache keeps it behind its structural mutex
/// together with the capacity, and mirrors every insertion and removal into the
/// concurrent key index while that mutex is held.
///
/// # Examples
///
/// ```ignore
/// use recency_cache::list::RecencyList;
///
/// let mut list = RecencyList::new();
/// let a = list.add("a", 1);
/// list.add("b", 2);
///
/// // "a" becomes the most recently used entry
/// list.move_to_front(a);
/// assert_eq!(list.remove_last(), Some(("b", 2)));
/// ```
pub(crate) struct RecencyList<K, V> {
    /// Arena cells, occupied or vacant.
    slots: Vec<Slot<K, V>>,
    /// Indices of vacant slots available for reuse.
    free: Vec<usize>,
    /// Most recently used entry.
    head: Option<usize>,
    /// Least recently used entry.
    tail: Option<usize>,
    /// Number of occupied slots.
    len: usize,
    /// Generation handed to the next allocation. Never reused.
    next_generation: u64,
}

impl<K, V> RecencyList<K, V> {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries before the arena grows.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RecencyList {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            next_generation: 0,
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no entries.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `handle` still names a live entry.
    #[inline]
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the entry behind `handle`, or `None` if it has since been removed.
    pub(crate) fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots
            .get(handle.slot)
            .and_then(|slot| slot.get(handle.generation))
    }

    /// Mutable variant of [`get`](Self::get). Does not change recency.
    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots
            .get_mut(handle.slot)
            .and_then(|slot| slot.get_mut(handle.generation))
    }

    /// Adds a new entry at the front (most recently used end).
    pub(crate) fn add(&mut self, key: K, value: V) -> Handle {
        let handle = self.alloc(Entry::new(key, value));
        self.attach(handle.slot);
        self.len += 1;
        handle
    }

    /// Adds a new entry at the back (least recently used end).
    ///
    /// Used when rebuilding a list from a stored MRU-to-LRU sequence: appending
    /// each pair in read order reproduces the original order exactly.
    pub(crate) fn add_last(&mut self, key: K, value: V) -> Handle {
        let handle = self.alloc(Entry::new(key, value));
        self.attach_last(handle.slot);
        self.len += 1;
        handle
    }

    /// Moves an entry to the front of the list.
    ///
    /// Returns `true` if the order changed, `false` if the entry was already at
    /// the front or the handle is stale.
    pub(crate) fn move_to_front(&mut self, handle: Handle) -> bool {
        if !self.contains(handle) || self.head == Some(handle.slot) {
            return false;
        }
        self.detach(handle.slot);
        self.attach(handle.slot);
        true
    }

    /// Replaces the value behind `handle`, returning the previous value.
    ///
    /// Recency is left untouched; callers that treat an update as an access
    /// follow up with [`move_to_front`](Self::move_to_front).
    pub(crate) fn update(&mut self, handle: Handle, value: V) -> Result<V, V> {
        match self.get_mut(handle) {
            Some(entry) => Ok(mem::replace(&mut entry.value, value)),
            None => Err(value),
        }
    }

    /// Unlinks and frees the entry behind `handle`.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        if !self.contains(handle) {
            return None;
        }
        self.detach(handle.slot);
        self.release(handle.slot)
    }

    /// Removes the least recently used entry.
    pub(crate) fn remove_last(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.detach(tail);
        self.release(tail)
    }

    /// Drops every entry. Generations keep counting up so handles issued before
    /// the clear can never resolve again.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates from the most recently used entry to the least recently used one.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn alloc(&mut self, entry: Entry<K, V>) -> Handle {
        let generation = self.next_generation;
        self.next_generation += 1;
        let slot = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Slot::occupied(generation, entry);
                index
            }
            None => {
                self.slots.push(Slot::occupied(generation, entry));
                self.slots.len() - 1
            }
        };
        Handle { slot, generation }
    }

    fn release(&mut self, index: usize) -> Option<(K, V)> {
        let entry = self.slots.get_mut(index)?.entry.take()?;
        self.free.push(index);
        self.len -= 1;
        Some(entry.into_pair())
    }

    #[inline]
    fn links(&self, index: usize) -> Option<(Option<usize>, Option<usize>)> {
        self.slots
            .get(index)
            .and_then(|slot| slot.entry.as_ref())
            .map(|entry| (entry.prev, entry.next))
    }

    #[inline]
    fn entry_at(&mut self, index: usize) -> Option<&mut Entry<K, V>> {
        self.slots
            .get_mut(index)
            .and_then(|slot| slot.entry.as_mut())
    }

    /// Unlinks the entry at `index` from its neighbours without freeing it.
    fn detach(&mut self, index: usize) {
        let Some((prev, next)) = self.links(index) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(entry) = self.entry_at(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(entry) = self.entry_at(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(entry) = self.entry_at(index) {
            entry.prev = None;
            entry.next = None;
        }
    }

    /// Links a detached entry in as the new head.
    fn attach(&mut self, index: usize) {
        let old_head = self.head;
        if let Some(entry) = self.entry_at(index) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(entry) = self.entry_at(h) {
                    entry.prev = Some(index);
                }
            }
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    /// Links a detached entry in as the new tail.
    fn attach_last(&mut self, index: usize) {
        let old_tail = self.tail;
        if let Some(entry) = self.entry_at(index) {
            entry.next = None;
            entry.prev = old_tail;
        }
        match old_tail {
            Some(t) => {
                if let Some(entry) = self.entry_at(t) {
                    entry.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for RecencyList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("length", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Borrowing iterator over a [`RecencyList`], most recent first.
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let entry = self.list.slots.get(index)?.entry.as_ref()?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
