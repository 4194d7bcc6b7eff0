//! Error type shared by both hash maps

use thiserror::Error;

/// Failures a table operation can report.
///
/// Missing keys are not errors; lookups return `Option`. Only broken internal
/// consistency ends up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Re-inserting the live entries during a resize produced a different entry count.
    ///
    /// Happens when the hasher is not deterministic and two copies of a key ended up
    /// in the table.
    #[error("rehash produced {actual} entries, expected {expected}")]
    RehashSizeMismatch {
        /// Live entries before the resize
        expected: usize,
        /// Live entries after re-insertion
        actual: usize,
    },

    /// An open addressing insert probed its whole sequence without finding a free slot.
    #[error("no free slot on the probe sequence of a table with capacity {capacity}")]
    ProbeSequenceExhausted {
        /// Capacity of the table that was probed
        capacity: usize,
    },

    /// A chained table computed a bucket index outside its bucket array.
    #[error("bucket {index} is out of range for a table with capacity {capacity}")]
    BucketOutOfRange {
        /// Index the key hashed to
        index: usize,
        /// Number of buckets in the table
        capacity: usize,
    },
}
