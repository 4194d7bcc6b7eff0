//! Key hashing strategies
//!
//! Tables never hash keys themselves. They ask a [`KeyHasher`] for a number and reduce
//! it modulo their capacity. Any `Fn(&str) -> usize` works, so plain functions and
//! closures can be passed straight to the constructors.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Maps a key to a non-negative number.
///
/// Implementations must be deterministic: equal keys always produce equal values.
/// A hasher that breaks this is caught at the next resize as
/// [`TableError::RehashSizeMismatch`](crate::TableError::RehashSizeMismatch).
pub trait KeyHasher {
    /// Hashes `key`
    fn hash_key(&self, key: &str) -> usize;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> usize,
{
    fn hash_key(&self, key: &str) -> usize {
        self(key)
    }
}

/// Sum of the key's code points.
///
/// Anagrams collide, which makes it handy for exercising collision handling.
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0_usize, |hash, letter| hash.wrapping_add(letter as usize))
}

/// Sum of each code point weighted by its 1-based position.
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars().zip(1_usize..).fold(0_usize, |hash, (letter, position)| {
        hash.wrapping_add(position.wrapping_mul(letter as usize))
    })
}

/// Hashes the key with the standard library's `DefaultHasher`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn std_hash(key: &str) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_function_1() {
        assert_eq!(hash_function_1(""), 0);
        assert_eq!(hash_function_1("key1"), 378);
        assert_eq!(hash_function_1("ab"), hash_function_1("ba"));
    }

    #[test]
    fn test_hash_function_2() {
        assert_eq!(hash_function_2("1"), 49);
        assert_eq!(hash_function_2("20"), 50 + 2 * 48);
        assert_ne!(hash_function_2("ab"), hash_function_2("ba"));
    }

    #[test]
    fn test_closures_are_hashers() {
        let constant = |_: &str| 7_usize;
        assert_eq!(constant.hash_key("anything"), 7);
        assert_eq!(std_hash("apple"), std_hash("apple"));
    }
}
