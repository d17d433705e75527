//! Core traits for vector indices.
//!
//! The `VectorIndex` trait defines the common interface implemented by all
//! index types (BruteForce, SsTree).

use crate::{Record, Result, Vector};
use std::sync::Arc;

/// A match returned from k-NN search.
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// The matched record.
    pub record: Arc<Record>,
    /// Euclidean distance to the query (lower = more similar).
    pub distance: f32,
}

impl Neighbor {
    /// Create a new neighbor.
    pub fn new(record: Arc<Record>, distance: f32) -> Self {
        Self { record, distance }
    }
}

impl PartialEq for Neighbor {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.record == other.record
    }
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Compare by distance (lower is better)
        // Use total_cmp for proper NaN handling
        self.distance.total_cmp(&other.distance)
    }
}

/// Common interface for vector indices.
///
/// Insertion takes `&mut self`: mutation requires exclusive access to the
/// index, which the borrow checker enforces. Read operations take `&self`
/// and may run concurrently on a shared index.
pub trait VectorIndex {
    /// Insert a record.
    ///
    /// Inserting a record whose key is already present is a silent no-op;
    /// the originally inserted embedding is retained.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding's dimension doesn't match the
    /// index dimension, or if it contains non-finite values.
    fn insert(&mut self, record: Arc<Record>) -> Result<()>;

    /// Search for the k nearest neighbors to the query vector.
    ///
    /// Returns `min(k, len)` matches sorted by distance (ascending). An
    /// empty index or `k == 0` yields an empty vec.
    ///
    /// # Errors
    ///
    /// Returns an error if the query dimension doesn't match the index
    /// dimension.
    fn knn(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>>;

    /// Check if a record with this key exists.
    fn contains(&self, key: &str) -> bool;

    /// Number of records in the index.
    fn len(&self) -> usize;

    /// Check if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of vectors in this index.
    fn dimensions(&self) -> usize;
}
