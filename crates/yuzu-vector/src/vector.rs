//! Owned fixed-dimensional vector type.
//!
//! `Vector` wraps a `Vec<f32>` whose length is fixed at construction. The
//! arithmetic surface is the minimum the index layers need: componentwise
//! add/sub for centroid accumulation, scalar scale/divide, norms, and
//! Euclidean distance. Construction and cross-vector operations validate
//! dimensions at the API boundary; the hot-path kernels assume matching
//! dimensions and guard with `debug_assert` only.

use crate::distance::{euclidean_distance, euclidean_distance_squared};
use crate::{Result, VectorError};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::ops::{Add, AddAssign, Index, Sub};

/// Scalars with absolute value below this threshold are rejected by
/// [`Vector::div_scalar`].
pub const DIVISION_EPSILON: f32 = 1e-8;

/// An owned vector in R^D with D fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    coords: Vec<f32>,
}

impl Vector {
    /// Create a vector from coordinates, validating the length.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] when `coords.len() != dim`.
    pub fn from_coords(dim: usize, coords: Vec<f32>) -> Result<Self> {
        if coords.len() != dim {
            return Err(VectorError::DimensionMismatch {
                expected: dim,
                actual: coords.len(),
            });
        }
        Ok(Self { coords })
    }

    /// The zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        Self {
            coords: vec![0.0; dim],
        }
    }

    /// A vector with coordinates drawn uniformly from `[min, max)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, dim: usize, min: f32, max: f32) -> Self {
        let between = Uniform::from(min..max);
        Self {
            coords: (0..dim).map(|_| between.sample(rng)).collect(),
        }
    }

    /// Dimensionality of this vector.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The raw coordinate slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }

    /// Coordinate at `index`, validating the bound.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::OutOfRange`] when `index >= dim`.
    pub fn coord(&self, index: usize) -> Result<f32> {
        self.coords
            .get(index)
            .copied()
            .ok_or(VectorError::OutOfRange {
                index,
                dim: self.coords.len(),
            })
    }

    /// Multiply every coordinate by `scalar`.
    pub fn scale(&self, scalar: f32) -> Self {
        Self {
            coords: self.coords.iter().map(|c| c * scalar).collect(),
        }
    }

    /// Divide every coordinate by `scalar`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DivisionByZero`] when
    /// `|scalar| < DIVISION_EPSILON`.
    pub fn div_scalar(&self, scalar: f32) -> Result<Self> {
        if scalar.abs() < DIVISION_EPSILON {
            return Err(VectorError::DivisionByZero(scalar));
        }
        Ok(self.scale(1.0 / scalar))
    }

    /// Squared L2 norm.
    pub fn norm_squared(&self) -> f32 {
        self.coords.iter().map(|c| c * c).sum()
    }

    /// L2 norm.
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance to `other`.
    ///
    /// Assumes matching dimensions (debug-asserted); use
    /// [`Vector::checked_distance`] at API boundaries.
    #[inline]
    pub fn distance(&self, other: &Vector) -> f32 {
        euclidean_distance(&self.coords, &other.coords)
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(&self, other: &Vector) -> f32 {
        euclidean_distance_squared(&self.coords, &other.coords)
    }

    /// Euclidean distance to `other`, validating dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] when the dimensions
    /// differ.
    pub fn checked_distance(&self, other: &Vector) -> Result<f32> {
        if self.dim() != other.dim() {
            return Err(VectorError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        Ok(self.distance(other))
    }

    /// True when every coordinate is finite (no NaN, no infinity).
    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.coords[index]
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        debug_assert_eq!(self.dim(), rhs.dim(), "Vector dimensions must match");
        Vector {
            coords: self
                .coords
                .iter()
                .zip(&rhs.coords)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        debug_assert_eq!(self.dim(), rhs.dim(), "Vector dimensions must match");
        Vector {
            coords: self
                .coords
                .iter()
                .zip(&rhs.coords)
                .map(|(a, b)| a - b)
                .collect(),
        }
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        debug_assert_eq!(self.dim(), rhs.dim(), "Vector dimensions must match");
        for (a, b) in self.coords.iter_mut().zip(&rhs.coords) {
            *a += b;
        }
    }
}
