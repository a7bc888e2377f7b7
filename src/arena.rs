//! Fixed-capacity generational arena.
//!
//! [`Arena`] is the memory pool behind every node in the scene graph. It wraps
//! a preallocated [`SlotMap`] — slots are recycled with a bumped version, so a
//! key held after removal fails the generation check instead of aliasing a new
//! occupant. Unlike a bare slotmap, the arena enforces a hard capacity:
//! `insert` never grows the backing storage, and exhaustion surfaces as a
//! recoverable [`Error::ArenaFull`].

use slotmap::{Key, SlotMap};

use crate::error::{Error, Result};

/// A fixed-capacity pool of values addressed by generational keys.
///
/// Keys are stable for the lifetime of the value; removal is O(1) and leaves
/// the slot on an internal free list for the next insertion. The capacity
/// chosen at construction is a hard ceiling.
#[derive(Debug)]
pub struct Arena<K: Key, V> {
    slots: SlotMap<K, V>,
    capacity: usize,
}

impl<K: Key, V> Arena<K, V> {
    /// Create an arena that can hold at most `capacity` values.
    ///
    /// The backing storage is reserved up front so insertion never
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
            capacity,
        }
    }

    /// Insert a value, returning its key.
    ///
    /// Fails with [`Error::ArenaFull`] when the arena is at capacity; the
    /// caller is expected to treat this as a creation failure, not a fault.
    pub fn insert(&mut self, value: V) -> Result<K> {
        if self.slots.len() >= self.capacity {
            tracing::warn!(capacity = self.capacity, "arena exhausted");
            return Err(Error::ArenaFull);
        }
        Ok(self.slots.insert(value))
    }

    /// Remove a value by key, returning it.
    ///
    /// A stale or never-valid key is a no-op returning `None`.
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.slots.remove(key)
    }

    /// Immutable access to a value.
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }

    /// Mutable access to a value.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key)
    }

    /// Whether the key addresses a live value (generation check included).
    pub fn contains(&self, key: K) -> bool {
        self.slots.contains_key(key)
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena holds no values.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether no free slots remain.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Iterate over `(key, &value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.slots.iter()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
