//! SS-tree nodes.
//!
//! Every node carries a bounding hypersphere (centroid + radius) that
//! encloses everything beneath it: a leaf's sphere covers its record
//! embeddings, an internal node's sphere covers its children's spheres.
//! The insertion engine keeps the envelopes tight by recomputing them on
//! every node whose entry set changed, bottom-up along the insert path.

use std::sync::Arc;
use yuzu_vector::{Record, Vector};

/// Node contents - either shared records (leaf) or owned children
/// (internal).
#[derive(Debug, Clone)]
pub enum NodeEntries {
    /// Leaf node: shared references to externally-owned records.
    Leaf(Vec<Arc<Record>>),
    /// Internal node: owned child nodes.
    Internal(Vec<SsNode>),
}

/// Outcome of inserting a record into a subtree.
///
/// A split propagates upward through this return value; the parent
/// replaces the overflowed child with the two siblings. No parent
/// back-links are needed.
#[derive(Debug)]
pub(crate) enum InsertOutcome {
    /// The key was already present in the target leaf; nothing changed.
    Duplicate,
    /// The record was absorbed; envelopes along the path are refreshed.
    Inserted,
    /// The node overflowed and was drained into two fresh siblings.
    Split(SsNode, SsNode),
}

/// A node in the SS-tree.
#[derive(Debug, Clone)]
pub struct SsNode {
    centroid: Vector,
    radius: f32,
    max_entries: usize,
    entries: NodeEntries,
}

impl SsNode {
    /// Create a leaf holding a single record.
    ///
    /// The envelope is exact by construction: centroid = embedding,
    /// radius = 0.
    pub(crate) fn new_leaf(record: Arc<Record>, max_entries: usize) -> Self {
        Self {
            centroid: record.embedding().clone(),
            radius: 0.0,
            max_entries,
            entries: NodeEntries::Leaf(vec![record]),
        }
    }

    /// Create a leaf from a non-empty record set, envelope refreshed.
    pub(crate) fn from_records(records: Vec<Arc<Record>>, max_entries: usize) -> Self {
        debug_assert!(!records.is_empty());
        let dim = records[0].embedding().dim();
        let mut node = Self {
            centroid: Vector::zeros(dim),
            radius: 0.0,
            max_entries,
            entries: NodeEntries::Leaf(records),
        };
        node.update_envelope();
        node
    }

    /// Create an internal node from a non-empty child set, envelope
    /// refreshed.
    pub(crate) fn from_children(children: Vec<SsNode>, max_entries: usize) -> Self {
        debug_assert!(!children.is_empty());
        let dim = children[0].centroid.dim();
        let mut node = Self {
            centroid: Vector::zeros(dim),
            radius: 0.0,
            max_entries,
            entries: NodeEntries::Internal(children),
        };
        node.update_envelope();
        node
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self.entries, NodeEntries::Leaf(_))
    }

    /// Sphere center: the mean of this node's entry centroids.
    pub fn centroid(&self) -> &Vector {
        &self.centroid
    }

    /// Sphere radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The node's entries.
    pub fn entries(&self) -> &NodeEntries {
        &self.entries
    }

    /// Mutable access to the entries, for the split engine.
    pub(crate) fn entries_mut(&mut self) -> &mut NodeEntries {
        &mut self.entries
    }

    /// Records held by this node (empty slice for internal nodes).
    pub fn records(&self) -> &[Arc<Record>] {
        match &self.entries {
            NodeEntries::Leaf(records) => records,
            NodeEntries::Internal(_) => &[],
        }
    }

    /// Children of this node (empty slice for leaves).
    pub fn children(&self) -> &[SsNode] {
        match &self.entries {
            NodeEntries::Leaf(_) => &[],
            NodeEntries::Internal(children) => children,
        }
    }

    /// Number of entries (records or children).
    pub fn entry_count(&self) -> usize {
        match &self.entries {
            NodeEntries::Leaf(records) => records.len(),
            NodeEntries::Internal(children) => children.len(),
        }
    }

    /// Branching factor / leaf capacity this node was built with.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Check if a point lies inside this node's bounding sphere.
    pub fn intersects_point(&self, point: &Vector) -> bool {
        self.centroid.distance(point) <= self.radius
    }

    /// Recompute centroid and radius from the current entries.
    ///
    /// Centroid is the componentwise mean of entry centroids; radius is
    /// the tightest value covering every record (leaf) or every child
    /// sphere (internal). Idempotent for an unchanged entry set. Must be
    /// called on every ancestor of a mutated leaf, bottom-up.
    pub(crate) fn update_envelope(&mut self) {
        let count = self.entry_count();
        debug_assert!(count > 0, "envelope of an empty node is undefined");

        let mut sum = Vector::zeros(self.centroid.dim());
        match &self.entries {
            NodeEntries::Leaf(records) => {
                for record in records {
                    sum += record.embedding();
                }
            }
            NodeEntries::Internal(children) => {
                for child in children {
                    sum += &child.centroid;
                }
            }
        }
        let centroid = sum.scale(1.0 / count as f32);

        let radius = match &self.entries {
            NodeEntries::Leaf(records) => records
                .iter()
                .map(|r| centroid.distance(r.embedding()))
                .fold(0.0f32, f32::max),
            NodeEntries::Internal(children) => children
                .iter()
                .map(|c| centroid.distance(&c.centroid) + c.radius)
                .fold(0.0f32, f32::max),
        };

        self.centroid = centroid;
        self.radius = radius;
    }

    /// Index of the child whose centroid is closest to `target`.
    ///
    /// Ties break to the first occurrence (stable scan with strict `<`).
    fn closest_child_index(children: &[SsNode], target: &Vector) -> usize {
        debug_assert!(!children.is_empty());
        let mut best = 0;
        let mut best_dist = children[0].centroid.distance_squared(target);
        for (i, child) in children.iter().enumerate().skip(1) {
            let dist = child.centroid.distance_squared(target);
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Insert a record into this subtree.
    ///
    /// Descends into the closest child, then refreshes envelopes on the
    /// way back up. When a child splits, the original child is replaced
    /// by the two siblings; when this node itself overflows, it splits
    /// and hands the pair to its own parent.
    pub(crate) fn insert(&mut self, record: Arc<Record>) -> InsertOutcome {
        match &mut self.entries {
            NodeEntries::Leaf(records) => {
                if records.iter().any(|r| r.key() == record.key()) {
                    return InsertOutcome::Duplicate;
                }
                records.push(record);
            }
            NodeEntries::Internal(children) => {
                let idx = Self::closest_child_index(children, record.embedding());
                match children[idx].insert(record) {
                    InsertOutcome::Duplicate => return InsertOutcome::Duplicate,
                    InsertOutcome::Inserted => {}
                    InsertOutcome::Split(left, right) => {
                        children.remove(idx);
                        children.push(left);
                        children.push(right);
                    }
                }
            }
        }

        self.update_envelope();

        if self.entry_count() <= self.max_entries {
            InsertOutcome::Inserted
        } else {
            let (left, right) = self.split();
            InsertOutcome::Split(left, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, coords: Vec<f32>) -> Arc<Record> {
        let dim = coords.len();
        Arc::new(Record::new(Vector::from_coords(dim, coords).unwrap(), key))
    }

    #[test]
    fn test_new_leaf_envelope() {
        let node = SsNode::new_leaf(record("a", vec![2.0, 3.0]), 4);
        assert!(node.is_leaf());
        assert_eq!(node.centroid().as_slice(), &[2.0, 3.0]);
        assert_eq!(node.radius(), 0.0);
        assert_eq!(node.entry_count(), 1);
    }

    #[test]
    fn test_leaf_envelope_covers_records() {
        let node = SsNode::from_records(
            vec![
                record("a", vec![0.0, 0.0]),
                record("b", vec![4.0, 0.0]),
                record("c", vec![2.0, 2.0]),
            ],
            4,
        );

        // Centroid is the mean of the three embeddings
        assert_eq!(node.centroid().as_slice(), &[2.0, 2.0 / 3.0]);

        for r in node.records() {
            assert!(node.centroid().distance(r.embedding()) <= node.radius() + 1e-6);
        }
    }

    #[test]
    fn test_internal_envelope_covers_child_spheres() {
        let left = SsNode::from_records(
            vec![record("a", vec![0.0, 0.0]), record("b", vec![2.0, 0.0])],
            4,
        );
        let right = SsNode::from_records(
            vec![record("c", vec![10.0, 0.0]), record("d", vec![12.0, 0.0])],
            4,
        );

        let parent = SsNode::from_children(vec![left, right], 4);
        assert!(!parent.is_leaf());

        for child in parent.children() {
            let reach = parent.centroid().distance(child.centroid()) + child.radius();
            assert!(reach <= parent.radius() + 1e-6);
        }
    }

    #[test]
    fn test_update_envelope_idempotent() {
        let mut node = SsNode::from_records(
            vec![record("a", vec![1.0, 5.0]), record("b", vec![3.0, 1.0])],
            4,
        );
        let centroid = node.centroid().clone();
        let radius = node.radius();

        node.update_envelope();

        assert_eq!(node.centroid(), &centroid);
        assert_eq!(node.radius(), radius);
    }

    #[test]
    fn test_closest_child_tie_breaks_to_first() {
        // Two children exactly equidistant from the target
        let a = SsNode::from_records(vec![record("a", vec![-1.0, 0.0])], 4);
        let b = SsNode::from_records(vec![record("b", vec![1.0, 0.0])], 4);
        let children = vec![a, b];

        let idx = SsNode::closest_child_index(&children, &Vector::zeros(2));
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_intersects_point() {
        let node = SsNode::from_records(
            vec![record("a", vec![0.0, 0.0]), record("b", vec![2.0, 0.0])],
            4,
        );

        assert!(node.intersects_point(&Vector::from_coords(2, vec![1.0, 0.0]).unwrap()));
        assert!(!node.intersects_point(&Vector::from_coords(2, vec![50.0, 0.0]).unwrap()));
    }

    #[test]
    fn test_duplicate_key_short_circuits() {
        let mut node = SsNode::new_leaf(record("a", vec![0.0, 0.0]), 4);
        let before = node.centroid().clone();

        let outcome = node.insert(record("a", vec![9.0, 9.0]));
        assert!(matches!(outcome, InsertOutcome::Duplicate));
        assert_eq!(node.entry_count(), 1);
        assert_eq!(node.centroid(), &before);
    }

    #[test]
    fn test_leaf_overflow_splits() {
        let mut node = SsNode::new_leaf(record("a", vec![0.0]), 2);
        assert!(matches!(
            node.insert(record("b", vec![10.0])),
            InsertOutcome::Inserted
        ));

        // Third record overflows a node with max_entries = 2
        match node.insert(record("c", vec![20.0])) {
            InsertOutcome::Split(left, right) => {
                assert!(left.is_leaf());
                assert!(right.is_leaf());
                assert_eq!(left.entry_count() + right.entry_count(), 3);
            }
            other => panic!("expected split, got {:?}", other),
        }
    }
}
