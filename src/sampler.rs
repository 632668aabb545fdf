//! Uniform sampling on the unit hypersphere.
//!
//! A vector of independent standard normal coordinates is rotationally
//! symmetric, so scaling it to unit length yields a direction drawn uniformly
//! from the sphere `S^(d-1)`. Normals come from the Box–Muller transform:
//!
//! ```text
//! z = sqrt(-2 ln u1) * cos(2π u2),    u1, u2 ~ U(0, 1)
//! ```
//!
//! Only the cosine branch is used; each coordinate consumes two fresh uniforms.
//!
//! # Randomness
//!
//! The generator is injected. Any [`rand::Rng`] works, including `&mut R`, so a
//! caller can lend its generator for the duration of a run. Seed with
//! [`rand::SeedableRng::seed_from_u64`] for reproducible draws.

use std::f64::consts::TAU;
use std::ops::Deref;

use rand::Rng;

use crate::dense::norm;

/// Relative tolerance on the norm of a [`UnitVector`].
pub const UNIT_NORM_TOLERANCE: f64 = 1e-9;

/// A vector with Euclidean norm 1 (within [`UNIT_NORM_TOLERANCE`]).
///
/// Immutable once built. Dereferences to `[f64]`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitVector(Vec<f64>);

impl UnitVector {
    /// Scale `raw` to unit length.
    ///
    /// Returns `None` if `raw` is empty, contains a non-finite coordinate, or
    /// has a norm too small to divide by.
    ///
    /// ```rust
    /// use concentration::UnitVector;
    ///
    /// let v = UnitVector::from_raw(vec![3.0, 4.0]).unwrap();
    /// assert_eq!(v.as_slice(), &[0.6, 0.8]);
    /// assert!(UnitVector::from_raw(vec![0.0, 0.0]).is_none());
    /// ```
    pub fn from_raw(mut raw: Vec<f64>) -> Option<Self> {
        if raw.is_empty() || !raw.iter().all(|x| x.is_finite()) {
            return None;
        }
        let n = norm(&raw);
        if !n.is_normal() {
            return None;
        }
        for x in raw.iter_mut() {
            *x /= n;
        }
        Some(Self(raw))
    }

    /// Number of coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume the vector, returning its coordinates.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for UnitVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for UnitVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Draws uniformly distributed unit vectors from an injected generator.
///
/// # Example
///
/// ```rust
/// use concentration::{norm, VectorSampler};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut sampler = VectorSampler::new(StdRng::seed_from_u64(7));
/// let v = sampler.generate(128);
/// assert_eq!(v.dimension(), 128);
/// assert!((norm(&v) - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct VectorSampler<R> {
    rng: R,
}

impl<R: Rng> VectorSampler<R> {
    /// Wrap a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give the generator back.
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// One standard normal variate via Box–Muller.
    ///
    /// `u1 = 0` would make the logarithm undefined, so it is redrawn.
    pub fn standard_normal(&mut self) -> f64 {
        let mut u1: f64 = self.rng.gen();
        while u1 == 0.0 {
            u1 = self.rng.gen();
        }
        let u2: f64 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }

    /// Draw a unit vector uniformly from the sphere in `dimension` dimensions.
    ///
    /// A raw draw whose norm is numerically zero is discarded and redrawn
    /// whole. For `dimension == 0` an empty vector is returned.
    pub fn generate(&mut self, dimension: usize) -> UnitVector {
        if dimension == 0 {
            return UnitVector(Vec::new());
        }
        loop {
            let raw: Vec<f64> = (0..dimension).map(|_| self.standard_normal()).collect();
            if let Some(v) = UnitVector::from_raw(raw) {
                return v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_unit_norm() {
        let mut sampler = VectorSampler::new(StdRng::seed_from_u64(42));
        for dim in [1, 2, 3, 4, 17, 256, 2048] {
            let v = sampler.generate(dim);
            assert_eq!(v.dimension(), dim);
            assert!(
                (norm(&v) - 1.0).abs() < UNIT_NORM_TOLERANCE,
                "norm off for dim={}",
                dim
            );
        }
    }

    #[test]
    fn test_one_dimension_is_a_sign() {
        let mut sampler = VectorSampler::new(StdRng::seed_from_u64(1));
        for _ in 0..100 {
            let v = sampler.generate(1);
            assert!((v[0].abs() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_uniform_is_redrawn() {
        // StepRng(0, 1 << 40) yields 0 first, so u1 must be redrawn from the
        // next value instead of producing ln(0).
        let mut sampler = VectorSampler::new(StepRng::new(0, 1 << 40));
        let z = sampler.standard_normal();
        assert!(z.is_finite());
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut sampler = VectorSampler::new(StdRng::seed_from_u64(9));
        let n = 50_000;
        let draws: Vec<f64> = (0..n).map(|_| sampler.standard_normal()).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.02, "mean {}", mean);
        assert!((var - 1.0).abs() < 0.03, "variance {}", var);
    }

    #[test]
    fn test_same_seed_same_vectors() {
        let mut a = VectorSampler::new(StdRng::seed_from_u64(3));
        let mut b = VectorSampler::new(StdRng::seed_from_u64(3));
        assert_eq!(a.generate(64), b.generate(64));
    }

    #[test]
    fn test_borrowed_generator() {
        let mut rng = StdRng::seed_from_u64(5);
        let first = VectorSampler::new(&mut rng).generate(8);
        let second = VectorSampler::new(&mut rng).generate(8);
        assert_ne!(first, second);
    }

    #[test]
    fn test_from_raw_rejects_degenerate() {
        assert!(UnitVector::from_raw(Vec::new()).is_none());
        assert!(UnitVector::from_raw(vec![0.0; 4]).is_none());
        assert!(UnitVector::from_raw(vec![f64::NAN, 1.0]).is_none());
        assert!(UnitVector::from_raw(vec![f64::INFINITY, 1.0]).is_none());
    }
}
