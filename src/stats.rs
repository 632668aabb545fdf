//! Running mean and population standard deviation.
//!
//! Welford's online update keeps a running mean and the sum of squared
//! deviations `M2`, so no large intermediate sums are subtracted from each
//! other:
//!
//! ```text
//! n    += 1
//! δ     = x - mean
//! mean += δ / n
//! M2   += δ * (x - mean)
//! ```
//!
//! The reported spread is the population standard deviation `sqrt(M2 / n)`,
//! which is what the `1/√d` reference describes.
//!
//! # References
//!
//! - Welford (1962). "Note on a Method for Calculating Corrected Sums of
//!   Squares and Products", Technometrics 4(3).

use crate::error::{Error, Result};

/// Mean and population standard deviation of a finished accumulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (`n` denominator).
    pub std: f64,
}

/// Online mean/variance accumulator.
///
/// ```rust
/// use concentration::StatisticsAccumulator;
///
/// let mut acc = StatisticsAccumulator::new();
/// for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// let s = acc.finalize().unwrap();
/// assert!((s.mean - 5.0).abs() < 1e-12);
/// assert!((s.std - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatisticsAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl StatisticsAccumulator {
    /// Empty accumulator.
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold one observation in.
    #[inline]
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Number of observations so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean and population standard deviation.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientSamples`] if nothing was observed.
    pub fn finalize(&self) -> Result<Summary> {
        if self.count == 0 {
            return Err(Error::InsufficientSamples);
        }
        let variance = (self.m2 / self.count as f64).max(0.0);
        Ok(Summary {
            mean: self.mean,
            std: variance.sqrt(),
        })
    }
}

impl Extend<f64> for StatisticsAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

impl FromIterator<f64> for StatisticsAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
