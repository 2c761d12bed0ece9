//! src/graph/data.rs
//!
//! Read-only sample sequence and the validated segment boundaries drawn over it.

use std::ops::{Range, RangeInclusive};
use std::rc::Rc;

use rand::Rng;

use super::error::PlotError;

/// Ordered sample values, fixed at construction and cheap to clone.
#[derive(Clone, Debug, PartialEq)]
pub struct Samples {
    values: Rc<[f64]>,
}

impl Samples {
    pub fn new(values: impl Into<Rc<[f64]>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Draw `count` uniform samples from `range`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, count: usize, range: RangeInclusive<f64>) -> Self {
        let values: Vec<f64> = (0..count)
            .map(|_| rng.random_range(range.clone()))
            .collect();
        Self::new(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// (min, max) over the finite samples, `None` when there are none.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut mn = f64::INFINITY;
        let mut mx = f64::NEG_INFINITY;
        for &v in self.values.iter().filter(|v| v.is_finite()) {
            if v < mn {
                mn = v;
            }
            if v > mx {
                mx = v;
            }
        }
        if mn == f64::INFINITY || mx == f64::NEG_INFINITY {
            return None;
        }
        Some((mn, mx))
    }
}

/// Starting indices of independently drawn line segments.
///
/// Invariants: strictly increasing, every index `< count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentBoundaries {
    starts: Vec<usize>,
    count: usize,
}

impl SegmentBoundaries {
    /// Validate `starts` against a sample count. Out-of-range or
    /// non-increasing indices are rejected.
    pub fn new(starts: Vec<usize>, count: usize) -> Result<Self, PlotError> {
        let mut previous: Option<usize> = None;
        for &index in &starts {
            if index >= count {
                return Err(PlotError::SegmentOutOfRange { index, count });
            }
            if let Some(prev) = previous {
                if index <= prev {
                    return Err(PlotError::SegmentsNotIncreasing {
                        previous: prev,
                        index,
                    });
                }
            }
            previous = Some(index);
        }
        Ok(Self { starts, count })
    }

    /// Every `step`-th index of a `count`-sample sequence, starting at 0.
    pub fn stride(count: usize, step: usize) -> Result<Self, PlotError> {
        if step == 0 {
            return Err(PlotError::ZeroStride);
        }
        Self::new((0..count).step_by(step).collect(), count)
    }

    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Sample count the boundaries were validated against.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Index ranges of every segment. Samples before the first boundary form
    /// a leading segment of their own.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        if self.count == 0 {
            return Vec::new();
        }
        let mut cuts: Vec<usize> = Vec::with_capacity(self.starts.len() + 1);
        if self.starts.first() != Some(&0) {
            cuts.push(0);
        }
        cuts.extend_from_slice(&self.starts);
        cuts.iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = cuts.get(i + 1).copied().unwrap_or(self.count);
                start..end
            })
            .collect()
    }

    /// Position (in [`ranges`](Self::ranges)) of the segment holding `index`.
    pub fn segment_of(&self, index: usize) -> Option<usize> {
        if index >= self.count {
            return None;
        }
        self.ranges().iter().position(|r| r.contains(&index))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn stride_four_over_thirty_one() {
        let segs = SegmentBoundaries::stride(31, 4).unwrap();
        assert_eq!(segs.starts(), &[0, 4, 8, 12, 16, 20, 24, 28]);
        assert!(segs.starts().iter().all(|&i| i < 31));
    }

    #[test]
    fn rejects_out_of_range_boundary() {
        assert_eq!(
            SegmentBoundaries::new(vec![0, 5, 31], 31),
            Err(PlotError::SegmentOutOfRange {
                index: 31,
                count: 31
            })
        );
    }

    #[test]
    fn rejects_non_increasing_boundaries() {
        assert_eq!(
            SegmentBoundaries::new(vec![0, 8, 8], 31),
            Err(PlotError::SegmentsNotIncreasing {
                previous: 8,
                index: 8
            })
        );
        assert!(SegmentBoundaries::new(vec![4, 2], 31).is_err());
    }

    #[test]
    fn zero_stride_is_an_error() {
        assert_eq!(SegmentBoundaries::stride(10, 0), Err(PlotError::ZeroStride));
    }

    #[test]
    fn ranges_cover_every_sample() {
        let segs = SegmentBoundaries::stride(10, 4).unwrap();
        assert_eq!(segs.ranges(), vec![0..4, 4..8, 8..10]);

        let late = SegmentBoundaries::new(vec![3, 7], 10).unwrap();
        assert_eq!(late.ranges(), vec![0..3, 3..7, 7..10]);
        assert_eq!(late.segment_of(0), Some(0));
        assert_eq!(late.segment_of(7), Some(2));
        assert_eq!(late.segment_of(10), None);
    }

    #[test]
    fn empty_boundaries_mean_one_segment() {
        let segs = SegmentBoundaries::new(Vec::new(), 5).unwrap();
        assert_eq!(segs.ranges(), vec![0..5]);
        assert!(SegmentBoundaries::new(Vec::new(), 0).unwrap().ranges().is_empty());
    }

    #[test]
    fn random_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = Samples::random(&mut rng, 31, 0.0..=100.0);
        assert_eq!(samples.len(), 31);
        let (mn, mx) = samples.bounds().unwrap();
        assert!(mn >= 0.0 && mx <= 100.0);
    }

    #[test]
    fn bounds_skip_non_finite() {
        let samples = Samples::new(vec![f64::NAN, 2.0, -1.0]);
        assert_eq!(samples.bounds(), Some((-1.0, 2.0)));
        assert_eq!(Samples::new(Vec::new()).bounds(), None);
    }
}
