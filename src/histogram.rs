//! Density histograms over a fixed display domain.
//!
//! Values are binned over `[min, max)`:
//!
//! ```text
//! width     = (max - min) / bins
//! index     = floor((x - min) / width)
//! density_i = count_i / (total * width)
//! ```
//!
//! `total` counts every input value, including the ones outside the domain.
//! Out-of-domain values are dropped without error: display domains are often
//! chosen narrower than the possible range to gain resolution. When nothing
//! is dropped, `Σ density_i * width = 1`.
//!
//! No clamping happens here. Distances are already clamped once, where they
//! are computed.

use crate::error::{Error, Result};

/// Default bin count for both display views.
pub const DEFAULT_BIN_COUNT: usize = 40;

/// One histogram bar.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistogramBin {
    /// Bin center.
    pub x: f64,
    /// Estimated probability density.
    pub density: f64,
}

/// Domain and resolution of a histogram view.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistogramSpec {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
    /// Number of equal-width bins.
    pub bins: usize,
}

impl HistogramSpec {
    /// A view over `[min, max)` with `bins` bins.
    pub const fn new(min: f64, max: f64, bins: usize) -> Self {
        Self { min, max, bins }
    }

    /// Default view for original distances: `[0, 2)`, 40 bins.
    pub const fn original() -> Self {
        Self::new(0.0, 2.0, DEFAULT_BIN_COUNT)
    }

    /// Default view for normalized distances: `[-2, 4)`, 40 bins.
    pub const fn normalized() -> Self {
        Self::new(-2.0, 4.0, DEFAULT_BIN_COUNT)
    }

    /// Width of one bin.
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }

    /// Check the domain is finite and non-empty, there is at least one bin,
    /// and the bin width is a normal float (neither overflowing nor subnormal).
    pub fn validate(&self) -> Result<()> {
        let usable = self.bins > 0
            && self.min.is_finite()
            && self.max.is_finite()
            && self.max > self.min
            && self.bin_width().is_normal();
        if usable {
            Ok(())
        } else {
            Err(Error::InvalidHistogram {
                min: self.min,
                max: self.max,
                bins: self.bins,
            })
        }
    }

    /// Bin `values` into a density histogram. See [`build_histogram`].
    pub fn build<I>(&self, values: I) -> Result<Vec<HistogramBin>>
    where
        I: IntoIterator<Item = f64>,
    {
        self.validate()?;
        let width = self.bin_width();
        let mut counts = vec![0u64; self.bins];
        let mut total = 0u64;

        for value in values {
            total += 1;
            if !(self.min..self.max).contains(&value) {
                continue;
            }
            // Rounding can land a value just under `max` on index `bins`.
            let index = (((value - self.min) / width).floor() as usize).min(self.bins - 1);
            counts[index] += 1;
        }

        // Fraction first, then width: `total * width` can overflow.
        let total = total.max(1) as f64;
        Ok(counts
            .iter()
            .enumerate()
            .map(|(i, &count)| HistogramBin {
                x: self.min + (i as f64 + 0.5) * width,
                density: count as f64 / total / width,
            })
            .collect())
    }
}

/// Bin `samples` over `[domain_min, domain_max)` into `bin_count` density bins.
///
/// An empty input yields all-zero densities.
///
/// # Errors
///
/// [`Error::InvalidHistogram`] if `bin_count == 0`, the domain is empty or
/// non-finite, or the bin width overflows or underflows.
///
/// # Example
///
/// ```rust
/// use concentration::build_histogram;
///
/// let bins = build_histogram(&[0.1, 0.2, 0.6, 0.7], 0.0, 1.0, 2).unwrap();
/// assert_eq!(bins[0].x, 0.25);
/// assert_eq!(bins[0].density, 1.0);
/// assert_eq!(bins[1].density, 1.0);
/// ```
pub fn build_histogram(
    samples: &[f64],
    domain_min: f64,
    domain_max: f64,
    bin_count: usize,
) -> Result<Vec<HistogramBin>> {
    HistogramSpec::new(domain_min, domain_max, bin_count).build(samples.iter().copied())
}
