//! Batched Monte Carlo driver.
//!
//! For every requested dimension the scheduler draws `n` pairs of random unit
//! vectors, records the cosine distance of each pair and its normalized value,
//! and summarizes both once the dimension is done.
//!
//! # Batches
//!
//! Samples are produced in fixed-size batches. Between batches the scheduler
//! reports progress, checks for cancellation and yields the thread, so a host
//! driving a long run stays responsive. Batch boundaries never influence the
//! numbers: the same generator state gives the same result for any batch
//! size.
//!
//! # All or nothing
//!
//! A run either returns a complete [`SimulationResult`] or an error. Invalid
//! input is detected before any sampling starts; cancellation discards
//! everything computed so far.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::dense::cosine_distance;
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::policy::SampleSizeStrategy;
use crate::result::{DimensionRecord, Sample, SimulationResult};
use crate::sampler::VectorSampler;
use crate::stats::StatisticsAccumulator;

/// Default number of samples per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Most samples one run may retain, summed over all dimensions.
pub const MAX_TOTAL_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<Sample>();

/// Advisory progress report, emitted after every batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Share of all planned samples completed, in `[0, 1]`.
    pub fraction_complete: f64,
    /// Dimension currently being sampled.
    pub current_dimension: usize,
    /// Position of `current_dimension` in the run order.
    pub dimension_index: usize,
    /// Samples completed across the whole run.
    pub samples_done: usize,
    /// Samples planned across the whole run.
    pub samples_total: usize,
}

/// Shared flag for aborting a run.
///
/// Clones observe the same flag. Cancelling is permanent.
///
/// ```rust
/// use concentration::CancellationToken;
///
/// let token = CancellationToken::new();
/// let host = token.clone();
/// host.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Drives sampling across dimensions in batches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationScheduler {
    batch_size: usize,
}

impl Default for SimulationScheduler {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SimulationScheduler {
    /// Scheduler with a custom batch size.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBatchSize`] if `batch_size == 0`.
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize);
        }
        Ok(Self { batch_size })
    }

    /// Samples per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Resolve the sample count for every dimension and validate the lot.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] for a zero dimension.
    /// - [`Error::DuplicateDimension`] if a dimension repeats.
    /// - [`Error::InvalidSampleSize`] if the strategy returns 0.
    /// - [`Error::SampleSizeTooLarge`] once the running total exceeds
    ///   [`MAX_TOTAL_SAMPLES`].
    pub fn plan<S>(&self, dimensions: &[usize], strategy: &S) -> Result<Vec<(usize, usize)>>
    where
        S: SampleSizeStrategy + ?Sized,
    {
        let mut seen = HashSet::with_capacity(dimensions.len());
        let mut plan = Vec::with_capacity(dimensions.len());
        let mut total = 0usize;
        for &dimension in dimensions {
            if dimension == 0 {
                return Err(Error::InvalidDimension(dimension));
            }
            if !seen.insert(dimension) {
                return Err(Error::DuplicateDimension(dimension));
            }
            let requested = strategy.sample_count(dimension);
            if requested == 0 {
                return Err(Error::InvalidSampleSize {
                    dimension,
                    requested,
                });
            }
            total = total
                .checked_add(requested)
                .filter(|&t| t <= MAX_TOTAL_SAMPLES)
                .ok_or(Error::SampleSizeTooLarge {
                    dimension,
                    requested,
                })?;
            plan.push((dimension, requested));
        }
        Ok(plan)
    }

    /// Run the simulation.
    ///
    /// `progress` is called after every batch. It is informational; nothing
    /// depends on what it does, though it may cancel `cancel`.
    ///
    /// # Errors
    ///
    /// Any error from [`plan`](Self::plan), [`Error::SampleSizeTooLarge`] if
    /// the samples for a dimension cannot be allocated, or
    /// [`Error::Cancelled`] if `cancel` is set at a batch boundary. No partial
    /// result is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use concentration::{CancellationToken, FixedSampleSize, SimulationScheduler};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(11);
    /// let result = SimulationScheduler::default()
    ///     .run(&mut rng, &[4, 64], &FixedSampleSize(500), |_| {}, &CancellationToken::new())
    ///     .unwrap();
    /// assert_eq!(result.dimensions(), &[4, 64]);
    /// assert_eq!(result.samples(64).unwrap().len(), 500);
    /// ```
    pub fn run<R, S, P>(
        &self,
        rng: &mut R,
        dimensions: &[usize],
        strategy: &S,
        mut progress: P,
        cancel: &CancellationToken,
    ) -> Result<SimulationResult>
    where
        R: Rng + ?Sized,
        S: SampleSizeStrategy + ?Sized,
        P: FnMut(Progress),
    {
        let plan = self.plan(dimensions, strategy)?;
        let samples_total: usize = plan.iter().map(|&(_, n)| n).sum();
        let mut sampler = VectorSampler::new(rng);
        let mut result = SimulationResult::with_capacity(plan.len());
        let mut samples_done = 0usize;

        for (dimension_index, &(dimension, count)) in plan.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(dimension, "simulation cancelled");
                return Err(Error::Cancelled { dimension });
            }
            debug!(dimension, count, "sampling dimension");

            let mut samples = Vec::new();
            samples
                .try_reserve_exact(count)
                .map_err(|_| Error::SampleSizeTooLarge {
                    dimension,
                    requested: count,
                })?;
            let mut original = StatisticsAccumulator::new();
            let mut normalized = StatisticsAccumulator::new();
            let mut remaining = count;

            while remaining > 0 {
                let batch = remaining.min(self.batch_size);
                for _ in 0..batch {
                    let a = sampler.generate(dimension);
                    let b = sampler.generate(dimension);
                    let distance = cosine_distance(&a, &b)?;
                    let sample = Sample {
                        original: distance,
                        normalized: normalize(distance, dimension),
                    };
                    original.update(sample.original);
                    normalized.update(sample.normalized);
                    samples.push(sample);
                }
                remaining -= batch;
                samples_done += batch;
                trace!(dimension, samples_done, samples_total, "batch complete");

                progress(Progress {
                    fraction_complete: samples_done as f64 / samples_total as f64,
                    current_dimension: dimension,
                    dimension_index,
                    samples_done,
                    samples_total,
                });
                if cancel.is_cancelled() {
                    warn!(dimension, samples_done, "simulation cancelled");
                    return Err(Error::Cancelled { dimension });
                }
                thread::yield_now();
            }

            let record =
                DimensionRecord::new(dimension, count, original.finalize()?, normalized.finalize()?);
            debug!(
                dimension,
                original_mean = record.original_mean,
                original_std = record.original_std,
                normalized_mean = record.normalized_mean,
                normalized_std = record.normalized_std,
                ratio = record.ratio,
                "dimension complete"
            );
            result.push(record, samples);
        }

        info!(
            dimensions = result.len(),
            samples = samples_total,
            "simulation complete"
        );
        Ok(result)
    }
}
