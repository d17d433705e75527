//! Brute force vector index.
//!
//! Linear scan search - O(n * d) but simple and obviously correct. Serves
//! as the baseline for benchmarks and as the oracle the tree's k-NN
//! results are checked against in tests.

use crate::traits::{Neighbor, VectorIndex};
use crate::{Record, Result, Vector, VectorError};
use std::collections::HashSet;
use std::sync::Arc;

/// Brute force vector index.
///
/// Stores shared records in insertion order and performs a linear scan
/// for search. Duplicate keys are silent no-ops, matching the contract of
/// every Yuzu index.
pub struct BruteForceIndex {
    /// Records in insertion order
    records: Vec<Arc<Record>>,
    /// Keys already present, for duplicate suppression
    keys: HashSet<String>,
    /// Vector dimensions (all records must have this dimension)
    dimensions: usize,
}

impl BruteForceIndex {
    /// Create a new brute force index for vectors of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self {
            records: Vec::new(),
            keys: HashSet::new(),
            dimensions,
        }
    }

    /// The stored records in insertion order.
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// Validate a vector's dimensions and values.
    fn validate_vector(&self, vector: &Vector) -> Result<()> {
        if vector.dim() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.dim(),
            });
        }
        if !vector.is_finite() {
            return Err(VectorError::InvalidVector(
                "non-finite coordinate".to_string(),
            ));
        }
        Ok(())
    }
}

impl VectorIndex for BruteForceIndex {
    fn insert(&mut self, record: Arc<Record>) -> Result<()> {
        self.validate_vector(record.embedding())?;

        if self.keys.contains(record.key()) {
            return Ok(());
        }
        self.keys.insert(record.key().to_string());
        self.records.push(record);
        Ok(())
    }

    fn knn(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.dim(),
            });
        }

        if k == 0 {
            return Ok(vec![]);
        }

        // Compute distances for all records
        let mut results: Vec<Neighbor> = self
            .records
            .iter()
            .map(|r| Neighbor::new(Arc::clone(r), query.distance(r.embedding())))
            .collect();

        // Sort by distance (ascending), take top-k
        results.sort();
        results.truncate(k);

        Ok(results)
    }

    fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
