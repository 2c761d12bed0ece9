//! src/graph.rs
//!
//! Top-level `graph` module exposing the plot configuration, sample data,
//! animation clocks and shared interaction state.

pub mod anim;
pub mod config;
pub mod data;
pub mod edges;
pub mod error;
pub mod shared;

/// Re-exports
pub use config::PlotConfig;
pub use data::{SegmentBoundaries, Samples};
pub use edges::Edges;
pub use error::PlotError;
