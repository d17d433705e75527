//! Random data generators for index tests.
//!
//! Two families:
//! - Seeded `rand` helpers for bulk builds (invariant harnesses, benches)
//! - proptest strategies for property tests
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use yuzu_testkit::random_records;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let records = random_records(&mut rng, 100, 8);
//! assert_eq!(records.len(), 100);
//! ```

use proptest::prelude::*;
use rand::Rng;
use std::sync::Arc;
use yuzu_vector::{Record, Vector};

// =============================================================================
// Seeded rand helpers
// =============================================================================

/// Generate a vector with coordinates uniform in `[min, max)`.
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, dim: usize, min: f32, max: f32) -> Vector {
    Vector::random(rng, dim, min, max)
}

/// Generate `n` records with unique keys (`rec_0`, `rec_1`, ...) and
/// embeddings uniform in `[0, 1)^dim`.
pub fn random_records<R: Rng + ?Sized>(rng: &mut R, n: usize, dim: usize) -> Vec<Arc<Record>> {
    (0..n)
        .map(|i| {
            Arc::new(Record::new(
                random_vector(rng, dim, 0.0, 1.0),
                format!("rec_{}", i),
            ))
        })
        .collect()
}

// =============================================================================
// proptest strategies
// =============================================================================

/// Generate a finite coordinate in a range wide enough to exercise the
/// variance math without overflowing f32 sums.
pub fn coord() -> impl Strategy<Value = f32> {
    -100.0f32..100.0f32
}

/// Generate an embedding of the given dimension.
pub fn embedding(dim: usize) -> impl Strategy<Value = Vector> {
    prop::collection::vec(coord(), dim)
        .prop_map(move |coords| Vector::from_coords(dim, coords).expect("generated length"))
}

/// Generate a batch of 1..=max_len records with unique keys
/// (`rec_0`, `rec_1`, ...).
pub fn record_batch(dim: usize, max_len: usize) -> impl Strategy<Value = Vec<Arc<Record>>> {
    prop::collection::vec(embedding(dim), 1..=max_len).prop_map(|embeddings| {
        embeddings
            .into_iter()
            .enumerate()
            .map(|(i, e)| Arc::new(Record::new(e, format!("rec_{}", i))))
            .collect()
    })
}
