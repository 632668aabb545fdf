//! Run configuration with the defaults used for the concentration tables.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::histogram::HistogramSpec;
use crate::policy::TieredSampleSize;
use crate::result::{DistanceKind, SimulationResult};
use crate::scheduler::{CancellationToken, Progress, SimulationScheduler, DEFAULT_BATCH_SIZE};

/// Powers of two from 2 to 2048.
pub const DEFAULT_DIMENSIONS: [usize; 11] = [2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048];

/// Everything needed to reproduce a run, apart from the generator.
///
/// ```rust
/// use concentration::{CancellationToken, SimulationConfig, TieredSampleSize};
///
/// let config = SimulationConfig::default()
///     .with_dimensions(vec![8, 32])
///     .with_sample_size(TieredSampleSize::new(Vec::new(), 200))
///     .with_batch_size(50);
///
/// let result = config.run_seeded(3, |_| {}, &CancellationToken::new()).unwrap();
/// assert_eq!(result.record(32).unwrap().sample_count, 200);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Dimensions to sample, in processing order.
    pub dimensions: Vec<usize>,
    /// Samples per dimension.
    pub sample_size: TieredSampleSize,
    /// Samples per batch.
    pub batch_size: usize,
    /// Display view for raw distances.
    pub original_view: HistogramSpec,
    /// Display view for normalized distances.
    pub normalized_view: HistogramSpec,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS.to_vec(),
            sample_size: TieredSampleSize::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            original_view: HistogramSpec::original(),
            normalized_view: HistogramSpec::normalized(),
        }
    }
}

impl SimulationConfig {
    /// Replace the dimension list.
    pub fn with_dimensions(mut self, dimensions: Vec<usize>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Replace the sample-size policy.
    pub fn with_sample_size(mut self, sample_size: TieredSampleSize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Replace the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Replace the display view for one kind of distance.
    pub fn with_view(mut self, kind: DistanceKind, view: HistogramSpec) -> Self {
        match kind {
            DistanceKind::Original => self.original_view = view,
            DistanceKind::Normalized => self.normalized_view = view,
        }
        self
    }

    /// Display view for one kind of distance.
    pub fn view(&self, kind: DistanceKind) -> &HistogramSpec {
        match kind {
            DistanceKind::Original => &self.original_view,
            DistanceKind::Normalized => &self.normalized_view,
        }
    }

    /// Check everything that can be checked without sampling.
    pub fn validate(&self) -> Result<()> {
        let scheduler = SimulationScheduler::new(self.batch_size)?;
        scheduler.plan(&self.dimensions, &self.sample_size)?;
        self.original_view.validate()?;
        self.normalized_view.validate()
    }

    /// Run with a caller-supplied generator.
    pub fn run<R, P>(
        &self,
        rng: &mut R,
        progress: P,
        cancel: &CancellationToken,
    ) -> Result<SimulationResult>
    where
        R: Rng + ?Sized,
        P: FnMut(Progress),
    {
        self.validate()?;
        SimulationScheduler::new(self.batch_size)?.run(
            rng,
            &self.dimensions,
            &self.sample_size,
            progress,
            cancel,
        )
    }

    /// Reproducible run: the same seed gives the same result.
    pub fn run_seeded<P>(
        &self,
        seed: u64,
        progress: P,
        cancel: &CancellationToken,
    ) -> Result<SimulationResult>
    where
        P: FnMut(Progress),
    {
        self.run(&mut StdRng::seed_from_u64(seed), progress, cancel)
    }

    /// Run seeded from operating-system entropy.
    pub fn run_entropy<P>(&self, progress: P, cancel: &CancellationToken) -> Result<SimulationResult>
    where
        P: FnMut(Progress),
    {
        self.run(&mut StdRng::from_entropy(), progress, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::policy::Tier;

    fn small() -> SimulationConfig {
        SimulationConfig::default()
            .with_dimensions(vec![2, 4])
            .with_sample_size(TieredSampleSize::new(Vec::new(), 300))
    }

    #[test]
    fn test_defaults_match_display_setup() {
        let c = SimulationConfig::default();
        assert_eq!(c.dimensions, DEFAULT_DIMENSIONS.to_vec());
        assert_eq!(c.batch_size, 100);
        assert_eq!(*c.view(DistanceKind::Original), HistogramSpec::new(0.0, 2.0, 40));
        assert_eq!(*c.view(DistanceKind::Normalized), HistogramSpec::new(-2.0, 4.0, 40));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_same_seed_same_result() {
        let token = CancellationToken::new();
        let a = small().run_seeded(17, |_| {}, &token).unwrap();
        let b = small().run_seeded(17, |_| {}, &token).unwrap();
        let c = small().run_seeded(18, |_| {}, &token).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_view_fails_before_sampling() {
        let config = small().with_view(DistanceKind::Normalized, HistogramSpec::new(4.0, -2.0, 40));
        let mut calls = 0;
        let err = config
            .run_seeded(1, |_| calls += 1, &CancellationToken::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHistogram { .. }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_zero_tier_rejected() {
        let config = small().with_sample_size(TieredSampleSize::new(
            vec![Tier {
                max_dimension: 2,
                count: 0,
            }],
            10,
        ));
        assert_eq!(
            config.validate(),
            Err(Error::InvalidSampleSize {
                dimension: 2,
                requested: 0
            })
        );
    }

    #[test]
    fn test_entropy_run_completes() {
        let result = small().run_entropy(|_| {}, &CancellationToken::new()).unwrap();
        assert_eq!(result.total_samples(), 600);
    }
}
