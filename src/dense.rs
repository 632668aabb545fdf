//! Dense vector operations and the cosine distance between unit vectors.
//!
//! Core operations: dot product, norm, cosine distance.
//!
//! # Distance Range
//!
//! For unit vectors, `cosine_distance(a, b) = 1 - dot(a, b)`:
//!
//! | Relation | Distance |
//! |----------|----------|
//! | Identical direction | 0 |
//! | Orthogonal | 1 |
//! | Opposite direction | 2 |
//!
//! Normalization leaves the norm a few ulps away from 1, so the raw value can
//! drift just outside `[0, 2]`. [`cosine_distance`] is the single place where
//! that drift is clamped away; nothing downstream clamps again.

use crate::error::{Error, Result};

/// Smallest distance between two unit vectors.
pub const MIN_COSINE_DISTANCE: f64 = 0.0;

/// Largest distance between two unit vectors.
pub const MAX_COSINE_DISTANCE: f64 = 2.0;

/// Dot product of two vectors: `Σ(a[i] * b[i])`.
///
/// Returns 0.0 for empty vectors.
///
/// # Debug Assertions
///
/// In debug builds, panics if vector lengths differ. In release builds,
/// mismatched lengths silently use the shorter length. Use
/// [`cosine_distance`] for a checked boundary.
///
/// # Example
///
/// ```rust
/// use concentration::dot;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// assert!((dot(&a, &b) - 32.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "dot: dimension mismatch ({} vs {})",
        a.len(),
        b.len()
    );
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm (Euclidean norm) of a vector: `sqrt(Σ(v[i]²))`.
///
/// # Example
///
/// ```rust
/// use concentration::norm;
///
/// let v = [3.0, 4.0];
/// assert!((norm(&v) - 5.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Cosine distance between two unit vectors: `1 - dot(a, b)`, clamped to `[0, 2]`.
///
/// Both inputs are assumed to have unit norm, so the dot product is already
/// the cosine similarity and no division is performed. Non-unit inputs give a
/// clamped but otherwise meaningless value.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if the lengths differ.
///
/// # Example
///
/// ```rust
/// use concentration::cosine_distance;
///
/// let a = [1.0, 0.0];
/// let b = [0.0, 1.0];
/// assert_eq!(cosine_distance(&a, &b).unwrap(), 1.0);
///
/// let c = [-1.0, 0.0];
/// assert_eq!(cosine_distance(&a, &c).unwrap(), 2.0);
///
/// assert!(cosine_distance(&a, &[1.0, 0.0, 0.0]).is_err());
/// ```
#[inline]
pub fn cosine_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok((1.0 - dot(a, b)).clamp(MIN_COSINE_DISTANCE, MAX_COSINE_DISTANCE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_basic() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert!((dot(&a, &b) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_dot_empty() {
        let a: [f64; 0] = [];
        let b: [f64; 0] = [];
        assert_eq!(dot(&a, &b), 0.0);
    }

    #[test]
    fn test_norm() {
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_distance_identical() {
        let a = [0.6, 0.8];
        assert!(cosine_distance(&a, &a).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_cosine_distance_orthogonal() {
        let d = cosine_distance(&[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]).unwrap();
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_cosine_distance_clamps_drift() {
        // Slightly over-unit vectors push the raw value below 0 and above 2.
        let a = [1.0 + 1e-12, 0.0];
        assert_eq!(cosine_distance(&a, &a).unwrap(), 0.0);

        let b = [-(1.0 + 1e-12), 0.0];
        assert_eq!(cosine_distance(&a, &b).unwrap(), 2.0);
    }

    #[test]
    fn test_cosine_distance_mismatch() {
        let err = cosine_distance(&[1.0, 0.0], &[1.0]).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_cosine_distance_empty() {
        // No coordinates means zero similarity.
        assert_eq!(cosine_distance(&[], &[]).unwrap(), 1.0);
    }
}
