//! Vector primitives for Yuzu similarity search.
//!
//! This crate provides the building blocks shared by every Yuzu index:
//!
//! - **`Vector`**: an owned, fixed-dimensional `f32` vector with checked
//!   construction and the arithmetic the index layers need
//! - **Distance kernels**: Euclidean (L2) distance over raw slices
//! - **`Record`**: an embedding paired with its identity key
//! - **`VectorIndex` trait**: the common interface for index types
//! - **`BruteForceIndex`**: linear scan baseline (correctness oracle)
//!
//! # Architecture
//!
//! ```text
//! BruteForceIndex  (this crate)   -- O(n) scan, oracle for tests/benches
//! SsTree           (yuzu-sstree)  -- bounding-sphere tree, exact k-NN
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use yuzu_vector::{BruteForceIndex, Record, Vector, VectorIndex};
//!
//! let mut index = BruteForceIndex::new(3);
//!
//! let v = Vector::from_coords(3, vec![1.0, 2.0, 3.0]).unwrap();
//! index.insert(Arc::new(Record::new(v, "rec_0"))).unwrap();
//!
//! let query = Vector::from_coords(3, vec![1.0, 2.0, 3.5]).unwrap();
//! let results = index.knn(&query, 1).unwrap();
//! assert_eq!(results[0].record.key(), "rec_0");
//! ```

mod brute;
mod distance;
mod record;
mod traits;
mod vector;

pub use brute::BruteForceIndex;
pub use distance::{euclidean_distance, euclidean_distance_squared};
pub use record::Record;
pub use traits::{Neighbor, VectorIndex};
pub use vector::{Vector, DIVISION_EPSILON};

/// Error type for vector operations.
#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Division by zero: scalar {0} is below epsilon")]
    DivisionByZero(f32),

    #[error("Coordinate index out of range: {index} >= {dim}")]
    OutOfRange { index: usize, dim: usize },

    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    #[error("Index error: {0}")]
    IndexError(String),
}

/// Result type for vector operations.
pub type Result<T> = std::result::Result<T, VectorError>;
