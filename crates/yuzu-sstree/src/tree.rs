//! SS-tree facade.
//!
//! Owns the root node, handles the empty-tree and root-split cases, and
//! exposes insertion, exact-identity search, and best-first k-NN.

use crate::node::{InsertOutcome, NodeEntries, SsNode};
use crate::{Result, SsTreeError};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::Arc;
use yuzu_vector::{Neighbor, Record, Vector, VectorError, VectorIndex};

/// SS-tree configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsTreeConfig {
    /// Branching factor / leaf capacity (M). Must be at least 2.
    /// Default: 20
    pub max_entries: usize,
}

impl Default for SsTreeConfig {
    fn default() -> Self {
        Self { max_entries: 20 }
    }
}

impl SsTreeConfig {
    /// Validate the configuration.
    ///
    /// `max_entries` below 2 leaves the min-variance split with an empty
    /// candidate range, so it is rejected here.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries < 2 {
            return Err(SsTreeError::Config(format!(
                "max_entries must be >= 2, got {}",
                self.max_entries
            )));
        }
        Ok(())
    }
}

/// A frontier entry during k-NN search: a node and the lower bound on
/// the distance from the query to anything inside its sphere.
struct SphereCandidate<'a> {
    node: &'a SsNode,
    min_dist: f32,
}

impl PartialEq for SphereCandidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.min_dist == other.min_dist
    }
}

impl Eq for SphereCandidate<'_> {}

impl PartialOrd for SphereCandidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SphereCandidate<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.min_dist.total_cmp(&other.min_dist)
    }
}

/// An in-memory SS-tree over fixed-dimensional embeddings.
///
/// Height-balanced: every leaf sits at the same depth, and splits
/// propagate from the leaves toward the root, growing the tree only by
/// root promotion. Read operations take `&self`; insertion requires
/// exclusive access.
pub struct SsTree {
    config: SsTreeConfig,
    dimensions: usize,
    root: Option<SsNode>,
    /// Keys already present, for O(1) duplicate suppression and size.
    keys: HashSet<String>,
}

impl SsTree {
    /// Create a new, empty SS-tree.
    ///
    /// # Arguments
    ///
    /// * `dimensions` - Vector dimensions (fixed for the tree's lifetime)
    /// * `config` - Tree configuration
    ///
    /// # Errors
    ///
    /// Returns [`SsTreeError::Config`] when the configuration is invalid
    /// or `dimensions` is zero.
    pub fn new(dimensions: usize, config: SsTreeConfig) -> Result<Self> {
        config.validate()?;
        if dimensions == 0 {
            return Err(SsTreeError::Config(
                "dimensions must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            config,
            dimensions,
            root: None,
            keys: HashSet::new(),
        })
    }

    /// Get configuration.
    pub fn config(&self) -> &SsTreeConfig {
        &self.config
    }

    /// The root node, if any record has been inserted.
    pub fn root(&self) -> Option<&SsNode> {
        self.root.as_ref()
    }

    /// Number of levels from root to leaf (0 for an empty tree).
    ///
    /// Well-defined because every leaf sits at the same depth.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_ref();
        while let Some(n) = node {
            height += 1;
            node = n.children().first();
        }
        height
    }

    /// Validate a vector's dimensions and values.
    fn validate_vector(&self, vector: &Vector) -> Result<()> {
        if vector.dim() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.dim(),
            }
            .into());
        }
        if !vector.is_finite() {
            return Err(VectorError::InvalidVector("non-finite coordinate".to_string()).into());
        }
        Ok(())
    }

    /// Insert a record.
    ///
    /// A record whose key is already present is a silent no-op; the
    /// originally inserted embedding is retained. When the root splits,
    /// a fresh internal root adopts the two siblings and the tree grows
    /// one level.
    ///
    /// # Errors
    ///
    /// Returns an error when the embedding's dimension doesn't match the
    /// tree or contains non-finite values.
    pub fn insert(&mut self, record: Arc<Record>) -> Result<()> {
        self.validate_vector(record.embedding())?;

        if self.keys.contains(record.key()) {
            return Ok(());
        }
        let key = record.key().to_string();

        match &mut self.root {
            None => {
                self.root = Some(SsNode::new_leaf(record, self.config.max_entries));
            }
            Some(root) => match root.insert(record) {
                // Leaf-local guard; the key set already filtered this.
                InsertOutcome::Duplicate => return Ok(()),
                InsertOutcome::Inserted => {}
                InsertOutcome::Split(left, right) => {
                    tracing::debug!(len = self.keys.len() + 1, "root split, promoting new root");
                    *root = SsNode::from_children(vec![left, right], self.config.max_entries);
                }
            },
        }
        self.keys.insert(key);
        Ok(())
    }

    /// Find the leaf holding a record with the same key, pruning by
    /// bounding sphere.
    ///
    /// Returns `None` when no record with that key was inserted. Only
    /// subtrees whose sphere covers the embedding are visited, which is
    /// sound for any previously-inserted record because envelopes always
    /// cover their entries.
    pub fn search(&self, record: &Record) -> Option<&SsNode> {
        let root = self.root.as_ref()?;
        if record.embedding().dim() != self.dimensions {
            return None;
        }
        Self::search_node(root, record)
    }

    fn search_node<'a>(node: &'a SsNode, record: &Record) -> Option<&'a SsNode> {
        match node.entries() {
            NodeEntries::Leaf(records) => records
                .iter()
                .any(|r| r.key() == record.key())
                .then_some(node),
            NodeEntries::Internal(children) => children
                .iter()
                .filter(|c| c.intersects_point(record.embedding()))
                .find_map(|c| Self::search_node(c, record)),
        }
    }

    /// Lower bound on the distance from `query` to any point inside the
    /// node's sphere.
    fn min_dist(node: &SsNode, query: &Vector) -> f32 {
        (query.distance(node.centroid()) - node.radius()).max(0.0)
    }

    /// Search for the k nearest records to the query vector.
    ///
    /// Best-first branch-and-bound: a min-heap of subtrees keyed by
    /// their sphere lower bound, a bounded max-heap of the best k
    /// records seen. A subtree is visited only while its lower bound can
    /// still beat the current k-th best distance; once the closest
    /// remaining subtree can't, the traversal stops. Exact under the
    /// tree's covering invariants.
    ///
    /// Returns `min(k, len)` matches sorted by distance (ascending).
    ///
    /// # Errors
    ///
    /// Returns an error when the query dimension doesn't match the tree.
    pub fn knn(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.dim(),
            }
            .into());
        }

        let root = match &self.root {
            Some(root) => root,
            None => return Ok(vec![]),
        };
        if k == 0 {
            return Ok(vec![]);
        }

        // Min-heap of subtrees by lower bound (closest first)
        let mut frontier: BinaryHeap<Reverse<SphereCandidate>> = BinaryHeap::new();
        // Max-heap of the best k records (furthest first, for pruning)
        let mut results: BinaryHeap<Neighbor> =
            BinaryHeap::with_capacity(k.min(self.keys.len()) + 1);

        frontier.push(Reverse(SphereCandidate {
            node: root,
            min_dist: Self::min_dist(root, query),
        }));

        while let Some(Reverse(candidate)) = frontier.pop() {
            if results.len() == k {
                if let Some(worst) = results.peek() {
                    // The frontier pops in min_dist order; nothing left
                    // can improve the result either.
                    if candidate.min_dist > worst.distance {
                        break;
                    }
                }
            }

            match candidate.node.entries() {
                NodeEntries::Leaf(records) => {
                    for record in records {
                        let dist = query.distance(record.embedding());
                        if results.len() < k {
                            results.push(Neighbor::new(Arc::clone(record), dist));
                        } else if let Some(worst) = results.peek() {
                            if dist < worst.distance {
                                results.pop();
                                results.push(Neighbor::new(Arc::clone(record), dist));
                            }
                        }
                    }
                }
                NodeEntries::Internal(children) => {
                    for child in children {
                        let min_dist = Self::min_dist(child, query);
                        let hopeless = results.len() == k
                            && results
                                .peek()
                                .map(|w| min_dist > w.distance)
                                .unwrap_or(false);
                        if !hopeless {
                            frontier.push(Reverse(SphereCandidate {
                                node: child,
                                min_dist,
                            }));
                        }
                    }
                }
            }
        }

        // Ascending by distance
        Ok(results.into_sorted_vec())
    }

    /// Number of records in the tree.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Dimensionality of vectors in this tree.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl VectorIndex for SsTree {
    fn insert(&mut self, record: Arc<Record>) -> yuzu_vector::Result<()> {
        SsTree::insert(self, record).map_err(|e| match e {
            SsTreeError::Vector(e) => e,
            other => VectorError::IndexError(other.to_string()),
        })
    }

    fn knn(&self, query: &Vector, k: usize) -> yuzu_vector::Result<Vec<Neighbor>> {
        SsTree::knn(self, query, k).map_err(|e| match e {
            SsTreeError::Vector(e) => e,
            other => VectorError::IndexError(other.to_string()),
        })
    }

    fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
