//! Utility functions and traits shared by [`QuadraticHashMap`] and [`ChainedHashMap`]

use crate::{ChainedHashMap, QuadraticHashMap, error::TableError, hashing::KeyHasher};

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<V> {
    /// Returns the keys of the hash map as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec
    fn values(&self) -> Vec<V>;

    /// Puts every pair from `pairs`, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Propagates the first [`TableError`] returned by `put`.
    fn try_extend<I>(&mut self, pairs: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (String, V)>;
}

impl<V, H> HashMapExtensions<V> for QuadraticHashMap<V, H>
where
    V: Clone,
    H: KeyHasher,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn try_extend<I>(&mut self, pairs: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        for (key, value) in pairs {
            self.put(key, value)?;
        }
        Ok(())
    }
}

impl<V, H> HashMapExtensions<V> for ChainedHashMap<V, H>
where
    V: Clone,
    H: KeyHasher,
{
    fn keys(&self) -> Vec<String> {
        self.get_keys_and_values().into_iter().map(|(k, _)| k).collect()
    }

    fn values(&self) -> Vec<V> {
        self.get_keys_and_values().into_iter().map(|(_, v)| v).collect()
    }

    fn try_extend<I>(&mut self, pairs: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        for (key, value) in pairs {
            self.put(key, value)?;
        }
        Ok(())
    }
}

/// Creates a `QuadraticHashMap` from an iterator of key-value pairs
///
/// # Errors
///
/// Propagates the first [`TableError`] returned while inserting.
pub fn from_pairs<V, H, I>(
    capacity: usize,
    hasher: H,
    pairs: I,
) -> Result<QuadraticHashMap<V, H>, TableError>
where
    H: KeyHasher,
    I: IntoIterator<Item = (String, V)>,
{
    let mut map = QuadraticHashMap::new(capacity, hasher);
    for (key, value) in pairs {
        map.put(key, value)?;
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{hash_function_1, std_hash};

    fn pairs() -> Vec<(String, i32)> {
        vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
    }

    #[test]
    fn test_from_pairs() -> Result<(), TableError> {
        let map = from_pairs(0, std_hash, pairs())?;

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
        assert!(map.capacity() >= 7);
        Ok(())
    }

    #[test]
    fn test_keys_and_values() -> Result<(), TableError> {
        let mut open = QuadraticHashMap::new(11, hash_function_1);
        let mut chained = ChainedHashMap::new(11, hash_function_1);
        open.try_extend(pairs())?;
        chained.try_extend(pairs())?;

        // Slot and bucket order differ between the two tables
        for (mut keys, mut values) in
            [(open.keys(), open.values()), (chained.keys(), chained.values())]
        {
            keys.sort_unstable();
            values.sort_unstable();
            assert_eq!(keys, ["a", "b", "c"]);
            assert_eq!(values, [1, 2, 3]);
        }
        Ok(())
    }

    #[test]
    fn test_try_extend_overwrites() -> Result<(), TableError> {
        let mut map = ChainedHashMap::new(3, hash_function_1);
        map.try_extend(pairs())?;
        map.try_extend(vec![("a".to_string(), 10)])?;

        assert_eq!(map.get("a"), Some(&10));
        assert_eq!(map.len(), 3);
        Ok(())
    }
}
