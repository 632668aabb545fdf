//! How many samples to draw per dimension.
//!
//! Variance estimates at large `d` need more pairs to settle, so the default
//! policy grows the count in tiers. Any `Fn(usize) -> usize` is also a policy.

/// Maps a dimension to the number of distance samples to draw for it.
///
/// A returned count of 0 makes the run fail with
/// [`Error::InvalidSampleSize`](crate::Error::InvalidSampleSize).
pub trait SampleSizeStrategy {
    /// Sample count for `dimension`.
    fn sample_count(&self, dimension: usize) -> usize;
}

impl<F> SampleSizeStrategy for F
where
    F: Fn(usize) -> usize,
{
    fn sample_count(&self, dimension: usize) -> usize {
        self(dimension)
    }
}

/// Same count for every dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedSampleSize(pub usize);

impl SampleSizeStrategy for FixedSampleSize {
    fn sample_count(&self, _dimension: usize) -> usize {
        self.0
    }
}

/// One step of a [`TieredSampleSize`]: dimensions up to `max_dimension` draw `count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tier {
    /// Largest dimension (inclusive) covered by this tier.
    pub max_dimension: usize,
    /// Samples drawn for covered dimensions.
    pub count: usize,
}

/// Step function over dimension: the first tier whose bound covers the
/// dimension wins, otherwise `fallback`.
///
/// ```rust
/// use concentration::{SampleSizeStrategy, TieredSampleSize};
///
/// let policy = TieredSampleSize::default();
/// assert_eq!(policy.sample_count(32), 10_000);
/// assert_eq!(policy.sample_count(33), 20_000);
/// assert_eq!(policy.sample_count(256), 20_000);
/// assert_eq!(policy.sample_count(2048), 50_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "UnsortedTiers"))]
pub struct TieredSampleSize {
    tiers: Vec<Tier>,
    fallback: usize,
}

/// Wire form of [`TieredSampleSize`]; tiers may arrive in any order.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UnsortedTiers {
    tiers: Vec<Tier>,
    fallback: usize,
}

#[cfg(feature = "serde")]
impl From<UnsortedTiers> for TieredSampleSize {
    fn from(raw: UnsortedTiers) -> Self {
        Self::new(raw.tiers, raw.fallback)
    }
}

impl TieredSampleSize {
    /// Build from tiers in any order; they are sorted by bound.
    pub fn new(mut tiers: Vec<Tier>, fallback: usize) -> Self {
        tiers.sort_by_key(|t| t.max_dimension);
        Self { tiers, fallback }
    }

    /// Tiers sorted by bound.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Count used beyond the last tier.
    pub fn fallback(&self) -> usize {
        self.fallback
    }
}

impl Default for TieredSampleSize {
    /// `d ≤ 32 → 10000`, `d ≤ 256 → 20000`, else `50000`.
    fn default() -> Self {
        Self::new(
            vec![
                Tier {
                    max_dimension: 32,
                    count: 10_000,
                },
                Tier {
                    max_dimension: 256,
                    count: 20_000,
                },
            ],
            50_000,
        )
    }
}

impl SampleSizeStrategy for TieredSampleSize {
    fn sample_count(&self, dimension: usize) -> usize {
        self.tiers
            .iter()
            .find(|t| dimension <= t.max_dimension)
            .map_or(self.fallback, |t| t.count)
    }
}
