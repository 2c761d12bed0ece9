//! src/graph/shared.rs
//!
//! Per-plot interaction state: the last rendered layout, the gesture phase and
//! the animation clocks. The renderer writes it while drawing and the event
//! handler reads it, both on the UI thread.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use ratatui::layout::Rect;

use super::anim::{GlowAnimation, SegmentHighlight};

/// Pointer gesture phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    /// A press started inside the chart and has not been released yet.
    Scrubbing,
}

/// Where the chart landed on screen during the last frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    /// Canvas rectangle holding the line.
    pub chart: Rect,
    /// Columns reserved for the value readout.
    pub readout: Rect,
    /// Horizontal data range the canvas was fitted to, edge padding included.
    pub x_bounds: [f64; 2],
}

impl PlotLayout {
    /// Map a terminal column to the sample drawn there.
    ///
    /// The braille canvas places data x on dot `(x - left) * (2w - 1) / span`,
    /// two dots per column. The centre of a column is inverted through the
    /// same mapping, then rounded to the nearest sample. Columns outside the
    /// chart clamp to the first or last sample.
    pub fn index_at_column(&self, column: u16, count: usize) -> Option<usize> {
        if count == 0 || self.chart.width == 0 {
            return None;
        }
        if count == 1 {
            return Some(0);
        }
        let [left, right] = self.x_bounds;
        let span = right - left;
        if !span.is_finite() || span <= 0.0 {
            return None;
        }
        let dots = 2.0 * self.chart.width as f64 - 1.0;
        let offset = column as f64 - self.chart.x as f64;
        let x = left + (2.0 * offset + 1.0) * span / dots;
        let last = (count - 1) as f64;
        Some(x.round().clamp(0.0, last) as usize)
    }
}

#[derive(Debug)]
pub struct PlotShared {
    pub layout: Option<PlotLayout>,
    pub gesture: GestureState,
    /// Whether the glowing indicator was drawn last frame.
    pub indicator_mounted: bool,
    /// Host mount generation the current glow was started for.
    pub mount_generation: u64,
    pub glow: Option<GlowAnimation>,
    pub highlight: SegmentHighlight,
    /// Index last reported through the selection callback.
    pub last_reported: Option<usize>,
}

impl PlotShared {
    pub fn new(now: Instant) -> Self {
        Self {
            layout: None,
            gesture: GestureState::Idle,
            indicator_mounted: false,
            mount_generation: 0,
            glow: None,
            highlight: SegmentHighlight::new(now),
            last_reported: None,
        }
    }
}

/// Alias: Rc<RefCell<PlotShared>>
pub type SharedPlot = Rc<RefCell<PlotShared>>;
