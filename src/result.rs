//! Immutable outputs of a simulation run.

use std::collections::HashMap;

use crate::error::Result;
use crate::histogram::{HistogramBin, HistogramSpec};
use crate::stats::Summary;

/// One measured pair: raw cosine distance and its dimension-normalized value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Cosine distance in `[0, 2]`.
    pub original: f64,
    /// `normalize(original, dimension)`.
    pub normalized: f64,
}

/// Which component of a [`Sample`] to look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceKind {
    /// Raw cosine distance.
    Original,
    /// Dimension-normalized distance.
    Normalized,
}

impl DistanceKind {
    /// Pick this component out of a sample.
    #[inline]
    pub fn of(self, sample: &Sample) -> f64 {
        match self {
            DistanceKind::Original => sample.original,
            DistanceKind::Normalized => sample.normalized,
        }
    }

    /// Default display view for this component.
    pub fn default_view(self) -> HistogramSpec {
        match self {
            DistanceKind::Original => HistogramSpec::original(),
            DistanceKind::Normalized => HistogramSpec::normalized(),
        }
    }
}

/// Summary statistics for one dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionRecord {
    /// Vector dimension.
    pub dimension: usize,
    /// Number of sampled pairs.
    pub sample_count: usize,
    /// Mean raw distance.
    pub original_mean: f64,
    /// Population std of raw distances.
    pub original_std: f64,
    /// Mean normalized distance.
    pub normalized_mean: f64,
    /// Population std of normalized distances.
    pub normalized_std: f64,
    /// `1/√dimension`.
    pub theoretical_std: f64,
    /// `original_std / theoretical_std`.
    pub ratio: f64,
}

impl DimensionRecord {
    /// Assemble a record from the two finished accumulations.
    pub fn new(dimension: usize, sample_count: usize, original: Summary, normalized: Summary) -> Self {
        let theoretical_std = theoretical_std(dimension);
        Self {
            dimension,
            sample_count,
            original_mean: original.mean,
            original_std: original.std,
            normalized_mean: normalized.mean,
            normalized_std: normalized.std,
            theoretical_std,
            ratio: original.std / theoretical_std,
        }
    }

    /// `|ratio - 1|`: relative distance of the measured spread from `1/√d`.
    pub fn relative_error(&self) -> f64 {
        (self.ratio - 1.0).abs()
    }
}

/// Asymptotic standard deviation of the cosine distance between random unit
/// vectors in `dimension` dimensions.
#[inline]
pub fn theoretical_std(dimension: usize) -> f64 {
    1.0 / (dimension as f64).sqrt()
}

/// Everything a finished run produced. Read-only.
///
/// Only the scheduler builds one, and only once every dimension is complete.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    dimensions: Vec<usize>,
    records: HashMap<usize, DimensionRecord>,
    samples: HashMap<usize, Vec<Sample>>,
}

impl SimulationResult {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            dimensions: Vec::with_capacity(capacity),
            records: HashMap::with_capacity(capacity),
            samples: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, record: DimensionRecord, samples: Vec<Sample>) {
        let dimension = record.dimension;
        self.dimensions.push(dimension);
        self.records.insert(dimension, record);
        self.samples.insert(dimension, samples);
    }

    /// Dimensions in the order they were processed.
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Number of dimensions processed.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// True if no dimension was requested.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Summary for one dimension.
    pub fn record(&self, dimension: usize) -> Option<&DimensionRecord> {
        self.records.get(&dimension)
    }

    /// Summaries in processing order.
    pub fn records(&self) -> impl Iterator<Item = &DimensionRecord> + '_ {
        self.dimensions.iter().filter_map(|d| self.records.get(d))
    }

    /// Raw samples for one dimension, in draw order.
    pub fn samples(&self, dimension: usize) -> Option<&[Sample]> {
        self.samples.get(&dimension).map(Vec::as_slice)
    }

    /// Samples drawn across all dimensions.
    pub fn total_samples(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    /// Density histogram of one dimension's samples.
    ///
    /// Returns `Ok(None)` if the dimension was not part of the run.
    pub fn histogram(
        &self,
        dimension: usize,
        kind: DistanceKind,
        view: &HistogramSpec,
    ) -> Result<Option<Vec<HistogramBin>>> {
        match self.samples.get(&dimension) {
            Some(samples) => view.build(samples.iter().map(|s| kind.of(s))).map(Some),
            None => Ok(None),
        }
    }

    /// Histograms for a chosen subset of dimensions, in the order given.
    ///
    /// Dimensions that were not part of the run are skipped.
    pub fn histograms(
        &self,
        dimensions: &[usize],
        kind: DistanceKind,
        view: &HistogramSpec,
    ) -> Result<Vec<(usize, Vec<HistogramBin>)>> {
        view.validate()?;
        let mut out = Vec::with_capacity(dimensions.len());
        for &d in dimensions {
            if let Some(bins) = self.histogram(d, kind, view)? {
                out.push((d, bins));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(mean: f64, std: f64) -> Summary {
        Summary { mean, std }
    }

    fn tiny_result() -> SimulationResult {
        let mut r = SimulationResult::with_capacity(2);
        r.push(
            DimensionRecord::new(4, 2, summary(1.0, 0.25), summary(1.0, 0.5)),
            vec![
                Sample {
                    original: 0.75,
                    normalized: 0.5,
                },
                Sample {
                    original: 1.25,
                    normalized: 1.5,
                },
            ],
        );
        r.push(
            DimensionRecord::new(16, 1, summary(1.0, 0.0), summary(1.0, 0.0)),
            vec![Sample {
                original: 1.0,
                normalized: 1.0,
            }],
        );
        r
    }

    #[test]
    fn test_record_derives_theory_and_ratio() {
        let rec = DimensionRecord::new(4, 10, summary(1.0, 0.55), summary(1.0, 1.1));
        assert_eq!(rec.theoretical_std, 0.5);
        assert!((rec.ratio - 1.1).abs() < 1e-12);
        assert!((rec.relative_error() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_preserves_processing_order() {
        let r = tiny_result();
        assert_eq!(r.dimensions(), &[4, 16]);
        let dims: Vec<usize> = r.records().map(|rec| rec.dimension).collect();
        assert_eq!(dims, vec![4, 16]);
        assert_eq!(r.total_samples(), 3);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_histograms_for_subset() {
        let r = tiny_result();
        let view = HistogramSpec::new(0.0, 2.0, 4);
        let hs = r
            .histograms(&[16, 8, 4], DistanceKind::Original, &view)
            .unwrap();
        assert_eq!(hs.len(), 2);
        assert_eq!(hs[0].0, 16);
        assert_eq!(hs[1].0, 4);
        // 0.75 -> bin 1, 1.25 -> bin 2, density 1 / (2 * 0.5)
        assert_eq!(hs[1].1[1].density, 1.0);
        assert_eq!(hs[1].1[2].density, 1.0);
    }

    #[test]
    fn test_histogram_unknown_dimension() {
        let r = tiny_result();
        let view = DistanceKind::Normalized.default_view();
        assert_eq!(r.histogram(3, DistanceKind::Normalized, &view).unwrap(), None);
    }

    #[test]
    fn test_histograms_reject_bad_view() {
        let r = tiny_result();
        let bad = HistogramSpec::new(0.0, 2.0, 0);
        assert!(r.histograms(&[4], DistanceKind::Original, &bad).is_err());
    }
}
