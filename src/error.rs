//! Error kinds surfaced by the simulation engine.
//!
//! Every error aborts the operation that produced it. Nothing is retried:
//! redrawing a stochastic sample has no meaning, so retry decisions belong to
//! the caller.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while sampling, measuring or summarizing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Distance requested between vectors of different lengths.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// The sample-size policy asked for no samples.
    #[error("invalid sample size {requested} for dimension {dimension}; at least one sample is required")]
    InvalidSampleSize {
        /// Dimension the policy was queried for.
        dimension: usize,
        /// Count the policy returned.
        requested: usize,
    },

    /// The sample-size policy asked for more samples than can be held in memory.
    #[error("sample size {requested} for dimension {dimension} exceeds what a run can hold")]
    SampleSizeTooLarge {
        /// Dimension the policy was queried for.
        dimension: usize,
        /// Count the policy returned.
        requested: usize,
    },

    /// Statistics were finalized before any observation was folded in.
    #[error("cannot summarize zero observations")]
    InsufficientSamples,

    /// The run was cancelled through its [`CancellationToken`](crate::CancellationToken).
    #[error("simulation cancelled while processing dimension {dimension}")]
    Cancelled {
        /// Dimension in progress when cancellation was observed.
        dimension: usize,
    },

    /// Dimensions must be positive.
    #[error("invalid dimension {0}; dimensions must be positive")]
    InvalidDimension(usize),

    /// The same dimension was listed twice in one run.
    #[error("dimension {0} listed more than once")]
    DuplicateDimension(usize),

    /// Batches must contain at least one sample.
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// Histogram parameters do not describe a usable binning.
    #[error("invalid histogram: domain [{min}, {max}) with {bins} bins")]
    InvalidHistogram {
        /// Lower bound of the domain.
        min: f64,
        /// Upper bound of the domain.
        max: f64,
        /// Requested bin count.
        bins: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let e = Error::InvalidSampleSize {
            dimension: 64,
            requested: 0,
        };
        assert_eq!(
            e.to_string(),
            "invalid sample size 0 for dimension 64; at least one sample is required"
        );
        assert_eq!(
            Error::Cancelled { dimension: 8 }.to_string(),
            "simulation cancelled while processing dimension 8"
        );
        assert_eq!(
            Error::DimensionMismatch { left: 3, right: 4 }.to_string(),
            "dimension mismatch: 3 vs 4"
        );
        assert_eq!(
            Error::SampleSizeTooLarge {
                dimension: 2,
                requested: 7
            }
            .to_string(),
            "sample size 7 for dimension 2 exceeds what a run can hold"
        );
    }
}
