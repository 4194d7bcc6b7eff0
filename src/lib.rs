//! # Prime Map
//!
//! Hash maps with string keys and prime capacities.
//!
//! This crate provides two hash map implementations:
//!
//! - `QuadraticHashMap`: open addressing with quadratic probing and tombstone deletion
//! - `ChainedHashMap`: separate chaining with a singly linked list per bucket
//!
//! Both take the hash function as a value, so any `Fn(&str) -> usize` can drive them.
//! Capacities are rounded up to a prime when a table is built or resized. A table grows
//! to double its capacity before an insert that finds it at its load limit: half full
//! for open addressing, one entry per bucket for chaining.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::{QuadraticHashMap, TableError, hash_function_1};
//!
//! # fn main() -> Result<(), TableError> {
//! // Create a new hash map; 20 is rounded up to 23
//! let mut map = QuadraticHashMap::new(20, hash_function_1);
//! assert_eq!(map.capacity(), 23);
//!
//! // Insert values
//! map.put("apple", 1)?;
//! map.put("banana", 2)?;
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10)?;
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Chaining and Modes
//!
//! ```rust
//! use primemap::{ChainedHashMap, TableError, find_mode, hash_function_2};
//!
//! # fn main() -> Result<(), TableError> {
//! let mut map = ChainedHashMap::new(3, hash_function_2);
//! for i in 0..10 {
//!     map.put(i.to_string(), i * 10)?;
//! }
//! assert!(map.table_load() <= 1.0);
//! assert_eq!(map.get("7"), Some(&70));
//!
//! let (modes, frequency) = find_mode(&["apple", "apple", "grape", "melon", "peach"])?;
//! assert_eq!(modes, vec!["apple"]);
//! assert_eq!(frequency, 2);
//! # Ok(())
//! # }
//! ```

/// Singly linked chains backing the separate chaining buckets
mod chain;
/// Error type shared by both hash maps
mod error;
/// Hash functions and the `KeyHasher` strategy trait
mod hashing;
/// Mode finding on top of the chained map
mod mode;
/// Module implementing a hash map with quadratic probing
mod open_addressing;
/// Prime capacity sizing
mod prime;
/// Module implementing a hash map with separate chaining
mod separate_chaining;
/// Utility functions and traits for the hash maps
mod utils;

pub use error::TableError;
pub use hashing::{KeyHasher, hash_function_1, hash_function_2, std_hash};
pub use mode::find_mode;
pub use open_addressing::{Iter, QuadraticHashMap};
pub use prime::{is_prime, next_prime, prime_capacity};
pub use separate_chaining::{ChainedHashMap, DEFAULT_CAPACITY};
pub use utils::{HashMapExtensions, from_pairs};
