//! src/graph/config.rs
//!
//! Configuration values for line-plot appearance and animation timing.
//!
//! A `PlotConfig` is a plain value: hosts copy the default, override a few
//! fields through [`PlotConfig::custom`], and hand the result to the plot on
//! every frame. Nothing here validates ranges; the renderer clamps.

use std::time::Duration;

use super::edges::Edges;

/// Number of stroke points covered by one braille dot.
pub const POINTS_PER_DOT: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PlotConfig {
    /// Stroke width of the plotted line, in points.
    pub plot_line_width: f64,

    /// Stroke width of the latest-value indicator core, in points.
    pub glowing_indicator_width: f64,

    /// How far the glow ring grows, as a multiple of the indicator width.
    pub glowing_indicator_background_scale: f64,

    /// Seconds for one glow ring to expand and fade.
    pub glowing_indicator_glow_duration: f64,

    /// Seconds of rest between two glow cycles.
    pub glowing_indicator_delay_between_glow: f64,

    /// Seconds for the segment highlight to cross-fade when the selection
    /// moves to another segment.
    pub segment_selection_animation_duration: f64,

    /// Draw the line as a bright core with a dimmed halo.
    pub use_laser_light_style: bool,

    /// Canvas edges widened by half a stroke so thick lines are not clipped.
    pub adjusted_edges: Edges,
}

impl PlotConfig {
    /// Copy `self`, apply `overrides`, and return the result.
    ///
    /// Fields the closure does not touch keep the values of `self`.
    pub fn custom(mut self, overrides: impl FnOnce(&mut PlotConfig)) -> Self {
        overrides(&mut self);
        self
    }

    /// Line stroke thickness in braille dots (at least one).
    pub fn line_thickness_dots(&self) -> usize {
        points_to_dots(self.plot_line_width)
    }

    /// Indicator core diameter in braille dots (at least one).
    pub fn indicator_thickness_dots(&self) -> usize {
        points_to_dots(self.glowing_indicator_width)
    }

    pub fn glow_duration(&self) -> Duration {
        seconds(self.glowing_indicator_glow_duration)
    }

    pub fn glow_delay(&self) -> Duration {
        seconds(self.glowing_indicator_delay_between_glow)
    }

    pub fn segment_animation_duration(&self) -> Duration {
        seconds(self.segment_selection_animation_duration)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_line_width: 1.5,
            glowing_indicator_width: 6.0,
            glowing_indicator_background_scale: 5.0,
            glowing_indicator_glow_duration: 0.8,
            glowing_indicator_delay_between_glow: 0.5,
            segment_selection_animation_duration: 0.1,
            use_laser_light_style: false,
            adjusted_edges: Edges::empty(),
        }
    }
}

fn points_to_dots(points: f64) -> usize {
    if !points.is_finite() {
        return 1;
    }
    (points / POINTS_PER_DOT).round().max(1.0) as usize
}

// negative or non-finite durations collapse to zero
fn seconds(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}
