//! src/graph/error.rs
//!
//! Errors raised when constructing plot inputs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error("segment boundary {index} is outside 0..{count}")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("segment boundaries must be strictly increasing ({previous} then {index})")]
    SegmentsNotIncreasing { previous: usize, index: usize },

    #[error("segment stride must be at least 1")]
    ZeroStride,

    #[error("segment boundaries were built for {expected} samples, plot has {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}
