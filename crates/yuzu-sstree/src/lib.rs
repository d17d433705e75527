//! SS-tree similarity index for Yuzu.
//!
//! Provides exact k-nearest-neighbor search over fixed-dimensional
//! embeddings using a similarity search tree: a height-balanced tree
//! whose nodes carry bounding hyperspheres (centroid + radius).
//!
//! - Insertion descends to the closest leaf, refreshes bounding envelopes
//!   on the return path, and splits overfull nodes along the axis of
//!   maximum coordinate variance
//! - k-NN runs best-first branch-and-bound, pruning every subtree whose
//!   sphere cannot contain a closer point than the current k-th best
//!
//! # Architecture
//!
//! ```text
//! yuzu-vector::BruteForceIndex   -- O(n) scan (oracle, small sets)
//! yuzu-sstree::SsTree            -- sphere tree, exact k-NN  <-- This crate
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use yuzu_sstree::{SsTree, SsTreeConfig};
//! use yuzu_vector::{Record, Vector};
//!
//! let mut tree = SsTree::new(2, SsTreeConfig::default()).unwrap();
//!
//! for (i, coords) in [[0.0, 0.0], [10.0, 0.0], [5.0, 5.0]].iter().enumerate() {
//!     let v = Vector::from_coords(2, coords.to_vec()).unwrap();
//!     tree.insert(Arc::new(Record::new(v, format!("rec_{i}")))).unwrap();
//! }
//!
//! let query = Vector::from_coords(2, vec![4.0, 4.0]).unwrap();
//! let hits = tree.knn(&query, 1).unwrap();
//! assert_eq!(hits[0].record.key(), "rec_2");
//! ```

mod node;
mod split;
mod tree;

pub use node::{NodeEntries, SsNode};
pub use tree::{SsTree, SsTreeConfig};

/// Error type for SS-tree operations.
#[derive(Debug, thiserror::Error)]
pub enum SsTreeError {
    #[error("Vector error: {0}")]
    Vector(#[from] yuzu_vector::VectorError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for SS-tree operations.
pub type Result<T> = std::result::Result<T, SsTreeError>;
