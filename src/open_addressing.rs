use std::{fmt, iter, mem};

use crate::{
    error::TableError,
    hashing::KeyHasher,
    prime::{next_prime, prime_capacity},
};

/// Live entries allowed before the next insert grows the table, as a percentage of capacity
const LOAD_FACTOR_LIMIT: usize = 50;

/// A key-value pair stored in an occupied slot
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// State of one slot in the table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never used since the last resize or clear; probing stops here
    Empty,
    /// Held an entry that was removed; probing continues past it
    Tombstone,
    /// Holds a live entry
    Occupied(Entry<V>),
}

/// Builds `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// Quadratic probe positions `(start + i^2) % capacity` for `i` in `0..=capacity`.
///
/// Past `capacity` probes the positions repeat, so the walk ends there.
#[derive(Debug, Clone)]
struct ProbeSequence {
    /// Position yielded next
    index: usize,
    /// Probes yielded so far
    probe: usize,
    /// Capacity of the probed table
    capacity: usize,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.capacity == 0 || self.probe > self.capacity {
            return None;
        }

        let current = self.index;
        // (i + 1)^2 - i^2 = 2i + 1
        let step = (2 * self.probe + 1) % self.capacity;
        self.index = (self.index + step) % self.capacity;
        self.probe += 1;
        Some(current)
    }
}

/// A hash map with open addressing and quadratic probing.
///
/// Capacity is always prime. Before an insert, if half of the slots or more hold live
/// entries, the table doubles (rounded up to a prime) and re-inserts every live entry.
/// Removal leaves a tombstone so later probes still walk past the slot. Tombstones are
/// reused by later inserts and dropped by resizing.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct QuadraticHashMap<V, H = fn(&str) -> usize> {
    /// The slots of the table; its length is the capacity
    slots: Vec<Slot<V>>,
    /// Number of live entries
    size: usize,
    /// Maps keys to their starting slot
    hasher: H,
}

impl<V, H> QuadraticHashMap<V, H>
where
    H: KeyHasher,
{
    /// Creates an empty table with `capacity` rounded up to a prime
    #[must_use]
    pub fn new(capacity: usize, hasher: H) -> Self {
        Self { slots: empty_slots(next_prime(capacity)), size: 0, hasher }
    }

    /// Probe positions for `key` in the current table
    #[allow(clippy::arithmetic_side_effects)]
    fn probe(&self, key: &str) -> ProbeSequence {
        let capacity = self.capacity();
        let start = if capacity == 0 { 0 } else { self.hasher.hash_key(key) % capacity };
        ProbeSequence { index: start, probe: 0, capacity }
    }

    /// Index of the live slot holding `key`
    fn find_index(&self, key: &str) -> Option<usize> {
        for index in self.probe(key) {
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(index),
                Slot::Tombstone | Slot::Occupied(_) => {}
            }
        }
        None
    }

    /// True when the next insert has to grow the table first
    fn needs_resize(&self) -> bool {
        self.size.saturating_mul(100) >= self.capacity().saturating_mul(LOAD_FACTOR_LIMIT)
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// A new key goes into the first tombstone on its probe sequence, or into the empty
    /// slot that ends the sequence when there is no tombstone.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::RehashSizeMismatch`] if a resize triggered by this insert
    /// loses or duplicates entries, and with [`TableError::ProbeSequenceExhausted`] if
    /// the probe sequence has neither an empty slot nor a tombstone.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, TableError> {
        if self.needs_resize() {
            self.resize_table(self.capacity().saturating_mul(2))?;
        }

        let key = key.into();
        let mut first_tombstone = None;
        let mut empty = None;

        for index in self.probe(&key) {
            match self.slots.get_mut(index) {
                None => break,
                Some(Slot::Empty) => {
                    empty = Some(index);
                    break;
                }
                Some(Slot::Tombstone) => {
                    first_tombstone = first_tombstone.or(Some(index));
                }
                Some(Slot::Occupied(entry)) if entry.key == key => {
                    return Ok(Some(mem::replace(&mut entry.value, value)));
                }
                Some(Slot::Occupied(_)) => {}
            }
        }

        let Some(slot) = first_tombstone.or(empty).and_then(|index| self.slots.get_mut(index))
        else {
            // Unreachable while the table stays under half full on a prime capacity
            return Err(TableError::ProbeSequenceExhausted { capacity: self.capacity() });
        };
        *slot = Slot::Occupied(Entry { key, value });
        self.size = self.size.saturating_add(1);
        Ok(None)
    }

    /// Retrieves the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.slots.get(self.find_index(key)?)? {
            Slot::Occupied(entry) => Some(&entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Retrieves a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_index(key)?;
        match self.slots.get_mut(index)? {
            Slot::Occupied(entry) => Some(&mut entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Returns true if a live entry is stored under `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Removes the entry stored under `key`, leaving a tombstone in its slot.
    ///
    /// Absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find_index(key)?;
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.size = self.size.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table with `new_capacity` slots, re-inserting every live entry.
    ///
    /// Requests below the number of live entries are ignored. A prime request is used
    /// as is, anything else is rounded up to a prime. Re-insertion goes through
    /// [`put`](Self::put), so the table keeps growing while the entries would overload
    /// the requested capacity. Tombstones are discarded.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::RehashSizeMismatch`] when re-insertion ends with a
    /// different number of live entries, which only a non-deterministic hasher causes.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity < self.size {
            return Ok(());
        }

        let old_slots = mem::replace(&mut self.slots, empty_slots(prime_capacity(new_capacity)));
        let expected = mem::replace(&mut self.size, 0);

        for slot in old_slots {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value)?;
            }
        }

        if self.size == expected {
            Ok(())
        } else {
            Err(TableError::RehashSizeMismatch { expected, actual: self.size })
        }
    }
}

impl<V, H> QuadraticHashMap<V, H> {
    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns live entries divided by capacity
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Counts slots that were never used. Tombstones are not empty.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Empty)).count()
    }

    /// Removes every entry and tombstone, keeping the capacity
    pub fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.size = 0;
    }

    /// Returns an iterator over the live entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0 }
    }
}

impl<V: Clone, H> QuadraticHashMap<V, H> {
    /// Copies every live entry out, in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)> {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V: fmt::Debug, H> fmt::Debug for QuadraticHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadraticHashMap")
            .field("size", &self.size)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for QuadraticHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: None")?,
                Slot::Tombstone => writeln!(f, "{index}: <tombstone>")?,
                Slot::Occupied(entry) => {
                    writeln!(f, "{index}: K: {} V: {}", entry.key, entry.value)?;
                }
            }
        }
        Ok(())
    }
}

impl<'a, V, H> IntoIterator for &'a QuadraticHashMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of a [`QuadraticHashMap`], in slot order.
///
/// Single pass; call [`QuadraticHashMap::iter`] again to start over.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slots being walked
    slots: &'a [Slot<V>],
    /// Current position in the iteration
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), &entry.value));
            }
        }
        None
    }
}
