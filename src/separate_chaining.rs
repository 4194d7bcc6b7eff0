use std::{fmt, iter, mem};

use crate::{
    chain::Chain,
    error::TableError,
    hashing::{KeyHasher, hash_function_1},
    prime::{next_prime, prime_capacity},
};

/// Capacity used by [`ChainedHashMap::default`]
pub const DEFAULT_CAPACITY: usize = 11;

/// Entries allowed before the next insert grows the table, as a percentage of capacity
const LOAD_FACTOR_LIMIT: usize = 100;

/// Builds `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    iter::repeat_with(Chain::new).take(capacity).collect()
}

/// A hash map that resolves collisions with a linked chain per bucket.
///
/// Capacity is always prime. Before an insert, if there are at least as many entries as
/// buckets, the table doubles (rounded up to a prime) and re-inserts every entry.
///
/// Note: This implementation is not thread-safe.
pub struct ChainedHashMap<V, H = fn(&str) -> usize> {
    /// One chain per bucket; its length is the capacity
    buckets: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Maps keys to their bucket
    hasher: H,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V, H> ChainedHashMap<V, H>
where
    H: KeyHasher,
{
    /// Creates an empty table with `capacity` rounded up to a prime
    #[must_use]
    pub fn new(capacity: usize, hasher: H) -> Self {
        Self { buckets: empty_chains(next_prime(capacity)), size: 0, hasher }
    }

    /// Bucket index of `key`
    #[allow(clippy::arithmetic_side_effects)]
    fn bucket_index(&self, key: &str) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => self.hasher.hash_key(key) % capacity,
        }
    }

    /// Chain that `key` belongs to
    fn bucket(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// Chain that `key` belongs to, for modification
    fn bucket_mut(&mut self, key: &str) -> Result<&mut Chain<V>, TableError> {
        let index = self.bucket_index(key);
        let capacity = self.capacity();
        self.buckets.get_mut(index).ok_or(TableError::BucketOutOfRange { index, capacity })
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// New keys are linked in at the front of their bucket.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::RehashSizeMismatch`] if a resize triggered by this insert
    /// loses or duplicates entries, and with [`TableError::BucketOutOfRange`] if the key
    /// hashes outside the bucket array.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, TableError> {
        if self.size.saturating_mul(100) >= self.capacity().saturating_mul(LOAD_FACTOR_LIMIT) {
            self.resize_table(self.capacity().saturating_mul(2))?;
        }

        let key = key.into();
        let bucket = self.bucket_mut(&key)?;
        if let Some(current) = bucket.find_mut(&key) {
            return Ok(Some(mem::replace(current, value)));
        }
        bucket.push_front(key, value);
        self.size = self.size.saturating_add(1);
        Ok(None)
    }

    /// Retrieves the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key)?.find(key)
    }

    /// Retrieves a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)?.find_mut(key)
    }

    /// Returns true if an entry is stored under `key`.
    ///
    /// Looks for the record itself, so any stored value counts.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks the entry stored under `key`. Absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let removed = self.buckets.get_mut(index)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(removed)
    }

    /// Rebuilds the table with `new_capacity` buckets, re-inserting every entry.
    ///
    /// A request of zero is ignored. A prime request is used as is, anything else is
    /// rounded up to a prime. Re-insertion goes through [`put`](Self::put), so the
    /// table keeps growing while the entries outnumber the buckets.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::RehashSizeMismatch`] when re-insertion ends with a
    /// different number of entries, which only a non-deterministic hasher causes.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity < 1 {
            return Ok(());
        }

        let old_buckets =
            mem::replace(&mut self.buckets, empty_chains(prime_capacity(new_capacity)));
        let expected = mem::replace(&mut self.size, 0);

        for (key, value) in old_buckets.into_iter().flatten() {
            self.put(key, value)?;
        }

        if self.size == expected {
            Ok(())
        } else {
            Err(TableError::RehashSizeMismatch { expected, actual: self.size })
        }
    }
}

impl<V, H> ChainedHashMap<V, H> {
    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns entries divided by buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Counts buckets with an empty chain
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }

    /// Drops every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets.fill_with(Chain::new);
        self.size = 0;
    }
}

impl<V: Clone, H> ChainedHashMap<V, H> {
    /// Copies every entry out, bucket by bucket and front to back within a bucket
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)> {
        self.buckets
            .iter()
            .flat_map(Chain::iter)
            .map(|(key, value)| (key.to_owned(), value.clone()))
            .collect()
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainedHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashMap")
            .field("size", &self.size)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for ChainedHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {bucket}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::hashing::hash_function_2;

    #[test]
    fn test_insert_and_get() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(31, hash_function_1);
        assert_eq!(map.get("key"), None);

        assert_eq!(map.put("key1", 10)?, None);
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.put("key1", 30)?, Some(10));
        assert_eq!(map.get("key1"), Some(&30));
        assert_eq!(map.len(), 1);
        Ok(())
    }

    #[test]
    fn test_default() {
        let map = ChainedHashMap::<usize>::default();
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
        assert!(map.is_empty());
        assert_eq!(map.empty_buckets(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_anagrams_share_a_bucket() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(11, hash_function_1);
        map.put("abc", 1)?;
        map.put("bca", 2)?;
        map.put("cab", 3)?;

        assert_eq!(map.empty_buckets(), 10);
        assert_eq!(map.longest_chain(), 3);
        assert_eq!(map.get("abc"), Some(&1));
        assert_eq!(map.get("bca"), Some(&2));
        assert_eq!(map.get("cab"), Some(&3));

        assert_eq!(map.remove("bca"), Some(2));
        assert_eq!(map.get("cab"), Some(&3));
        assert_eq!(map.longest_chain(), 2);
        Ok(())
    }

    #[test]
    fn test_extreme_hash_values_stay_in_range() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(7, |key: &str| usize::MAX - key.len());
        for key in ["a", "bb", "ccc", "dddd"] {
            assert_eq!(map.put(key, key.len())?, None);
        }
        assert_eq!(map.put("bb", 20)?, Some(2));
        assert_eq!(map.get("bb"), Some(&20));
        assert_eq!(map.get("dddd"), Some(&4));
        assert_eq!(map.len(), 4);
        Ok(())
    }

    #[test]
    fn test_remove_is_idempotent() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(53, hash_function_1);
        map.put("key1", 10)?;

        assert_eq!(map.remove("key4"), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove("key1"), Some(10));
        assert_eq!(map.remove("key1"), None);
        assert!(map.is_empty());
        Ok(())
    }

    #[test]
    fn test_contains_key_ignores_value() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(11, hash_function_1);
        map.put("nothing", None::<i32>)?;
        assert!(map.contains_key("nothing"));
        assert!(!map.contains_key("something"));
        Ok(())
    }

    #[test]
    fn test_growth_sequence() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(53, hash_function_1);
        for i in 0..53 {
            map.put(format!("str{i}"), i)?;
        }
        assert_eq!(map.capacity(), 53);
        assert!((map.table_load() - 1.0).abs() < f64::EPSILON);

        map.put("str53", 53)?;
        assert_eq!(map.capacity(), 107);

        for i in 54..150 {
            map.put(format!("str{i}"), i)?;
            assert!(map.table_load() <= 1.0);
        }
        assert_eq!(map.capacity(), 223);
        assert_eq!(map.len(), 150);
        Ok(())
    }

    #[test]
    fn test_resize_preserves_entries() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(75, hash_function_2);
        let keys: Vec<usize> = (1..1000).step_by(13).collect();
        for &key in &keys {
            map.put(key.to_string(), key * 42)?;
        }

        for capacity in (111..1000).step_by(117) {
            map.resize_table(capacity)?;
            assert!(crate::prime::is_prime(map.capacity()));
            assert_eq!(map.len(), keys.len());
            for &key in &keys {
                assert_eq!(map.get(&key.to_string()), Some(&(key * 42)));
                assert!(!map.contains_key(&(key + 1).to_string()));
            }
        }
        Ok(())
    }

    #[test]
    fn test_resize_to_small_capacity_regrows() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(53, hash_function_1);
        for i in 0..10 {
            map.put(format!("key{i}"), i)?;
        }

        map.resize_table(0)?;
        assert_eq!(map.capacity(), 53);

        map.resize_table(1)?;
        assert!(map.capacity() >= 10);
        assert!(crate::prime::is_prime(map.capacity()));
        assert_eq!(map.len(), 10);
        for i in 0..10 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
        Ok(())
    }

    #[test]
    fn test_keys_and_values_follow_buckets() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(11, hash_function_1);
        map.put("ab", 1)?; // 195 % 11 == 8
        map.put("ba", 2)?; // same bucket, linked in front
        map.put("a", 3)?; // 97 % 11 == 9

        let pairs = map.get_keys_and_values();
        assert_eq!(
            pairs,
            vec![("ba".to_string(), 2), ("ab".to_string(), 1), ("a".to_string(), 3)]
        );
        Ok(())
    }

    #[test]
    fn test_clear_keeps_capacity() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(101, hash_function_1);
        map.put("key1", 10)?;
        map.put("key2", 20)?;
        map.put("key1", 30)?;
        assert_eq!(map.len(), 2);

        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.empty_buckets(), 101);
        Ok(())
    }

    #[test]
    fn test_display() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(3, hash_function_2);
        map.put("1", 10)?; // 49 % 3 == 1
        map.put("4", 40)?; // 52 % 3 == 1

        assert_eq!(map.to_string(), "0: SLL []\n1: SLL [(4: 40) -> (1: 10)]\n2: SLL []\n");
        Ok(())
    }

    #[test]
    fn test_unstable_hasher_is_reported() -> Result<(), TableError> {
        let calls = Cell::new(0_usize);
        let unstable = move |_: &str| usize::from(calls.replace(calls.get() + 1) > 0);

        let mut map = ChainedHashMap::new(11, unstable);
        map.put("a", 1)?;
        map.put("a", 2)?;
        assert_eq!(map.len(), 2);

        assert_eq!(
            map.resize_table(23),
            Err(TableError::RehashSizeMismatch { expected: 2, actual: 1 })
        );
        Ok(())
    }
}
