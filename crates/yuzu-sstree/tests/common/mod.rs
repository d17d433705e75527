//! Shared structural checks for the SS-tree test suites.
//!
//! These walk the public node accessors only, so they exercise the same
//! surface an external invariant harness would.

use std::collections::HashSet;
use std::sync::Arc;
use yuzu_sstree::{NodeEntries, SsNode, SsTree};
use yuzu_vector::{Record, Vector, VectorIndex};

/// Float tolerance for envelope checks.
pub const TOLERANCE: f32 = 1e-3;

fn collect_keys(node: &SsNode, keys: &mut Vec<String>) {
    match node.entries() {
        NodeEntries::Leaf(records) => {
            keys.extend(records.iter().map(|r| r.key().to_string()));
        }
        NodeEntries::Internal(children) => {
            for child in children {
                collect_keys(child, keys);
            }
        }
    }
}

fn leaf_depths(node: &SsNode, depth: usize, out: &mut Vec<usize>) {
    if node.is_leaf() {
        out.push(depth);
    } else {
        for child in node.children() {
            leaf_depths(child, depth + 1, out);
        }
    }
}

fn check_node(node: &SsNode, max_entries: usize) {
    assert!(
        node.entry_count() <= max_entries,
        "node holds {} entries, capacity is {}",
        node.entry_count(),
        max_entries
    );
    assert!(node.entry_count() >= 1, "node must hold at least one entry");
    assert!(node.radius() >= 0.0, "radius must be non-negative");

    // Centroid is the mean of the entry centroids
    let dim = node.centroid().dim();
    let mut sum = Vector::zeros(dim);
    match node.entries() {
        NodeEntries::Leaf(records) => {
            for r in records {
                sum += r.embedding();
            }
        }
        NodeEntries::Internal(children) => {
            for c in children {
                sum += c.centroid();
            }
        }
    }
    let mean = sum.scale(1.0 / node.entry_count() as f32);
    for d in 0..dim {
        assert!(
            (mean[d] - node.centroid()[d]).abs() <= TOLERANCE,
            "centroid axis {} is {} but entry mean is {}",
            d,
            node.centroid()[d],
            mean[d]
        );
    }

    // Sphere covers everything beneath it
    match node.entries() {
        NodeEntries::Leaf(records) => {
            for r in records {
                let dist = node.centroid().distance(r.embedding());
                assert!(
                    dist <= node.radius() + TOLERANCE,
                    "record {} at distance {} escapes leaf sphere of radius {}",
                    r.key(),
                    dist,
                    node.radius()
                );
            }
        }
        NodeEntries::Internal(children) => {
            for c in children {
                let reach = node.centroid().distance(c.centroid()) + c.radius();
                assert!(
                    reach <= node.radius() + TOLERANCE,
                    "child sphere reaching {} escapes parent radius {}",
                    reach,
                    node.radius()
                );
                check_node(c, max_entries);
            }
        }
    }
}

/// Assert every structural invariant: completeness, uniform leaf depth,
/// capacity, sphere coverage, centroid correctness.
pub fn assert_structural_invariants(tree: &SsTree, records: &[Arc<Record>]) {
    let root = match tree.root() {
        Some(root) => root,
        None => {
            assert!(records.is_empty(), "tree is empty but records were inserted");
            return;
        }
    };

    // Completeness: every inserted key is reachable exactly once
    let mut keys = Vec::new();
    collect_keys(root, &mut keys);
    assert_eq!(keys.len(), records.len(), "record count mismatch");
    let unique: HashSet<&str> = keys.iter().map(|k| k.as_str()).collect();
    assert_eq!(unique.len(), keys.len(), "a key appears in two leaves");
    for r in records {
        assert!(unique.contains(r.key()), "record {} not reachable", r.key());
    }

    // Uniform depth
    let mut depths = Vec::new();
    leaf_depths(root, 0, &mut depths);
    assert!(
        depths.windows(2).all(|w| w[0] == w[1]),
        "leaves at differing depths: {:?}",
        depths
    );

    check_node(root, tree.config().max_entries);
}

/// Assert tree k-NN agrees with a brute-force oracle built over the same
/// records, comparing the sorted distance sequences.
pub fn assert_knn_matches_oracle(
    tree: &SsTree,
    oracle: &dyn VectorIndex,
    query: &Vector,
    k: usize,
) {
    let tree_hits = tree.knn(query, k).unwrap();
    let oracle_hits = oracle.knn(query, k).unwrap();

    assert_eq!(tree_hits.len(), oracle_hits.len(), "result count mismatch");
    for (t, o) in tree_hits.iter().zip(&oracle_hits) {
        assert!(
            (t.distance - o.distance).abs() <= TOLERANCE * (1.0 + o.distance.abs()),
            "distance {} diverges from oracle {}",
            t.distance,
            o.distance
        );
    }

    // Ascending order
    for pair in tree_hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

/// A structural fingerprint of the tree, for idempotence checks: one
/// entry per node in DFS order.
pub fn tree_shape(tree: &SsTree) -> Vec<(usize, bool, usize, Vec<f32>, f32)> {
    fn walk(node: &SsNode, depth: usize, out: &mut Vec<(usize, bool, usize, Vec<f32>, f32)>) {
        out.push((
            depth,
            node.is_leaf(),
            node.entry_count(),
            node.centroid().as_slice().to_vec(),
            node.radius(),
        ));
        for child in node.children() {
            walk(child, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    if let Some(root) = tree.root() {
        walk(root, 0, &mut out);
    }
    out
}
