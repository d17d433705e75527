//! Test utilities for Yuzu crates.
//!
//! Provides the random data generation the index tests and benches
//! share: seeded `rand` helpers for bulk data and proptest strategies
//! for property tests. Dev-dependency only; nothing here ships in a
//! production build.

pub mod generators;

pub use generators::{random_records, random_vector};
