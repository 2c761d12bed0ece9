//! src/demo/state.rs
//!
//! Slider and toggle values of the customization screen, and the plot
//! configuration rebuilt from them.

use crate::graph::{Edges, PlotConfig};

use super::controls::{ControlId, ControlValue};

#[derive(Clone, Debug, PartialEq)]
pub struct DemoState {
    pub relative_width: f64,
    pub line_width: f64,
    pub show_glowing_indicator: bool,
    pub indicator_width: f64,
    pub glowing_scale_effect: f64,
    pub glowing_duration: f64,
    pub delay_between_glows: f64,
    pub segment_animation_duration: f64,
    /// Fixed for the lifetime of the screen.
    pub laser_mode: bool,
    pub use_custom_indicator: bool,
    pub adjust_top: bool,
    pub adjust_bottom: bool,
    pub adjust_leading: bool,
    pub adjust_trailing: bool,
    /// Remount gate for the indicator; cleared by a refresh and set again by
    /// the deferred mount task.
    pub indicator_mounted: bool,
}

impl DemoState {
    pub fn new(laser_mode: bool) -> Self {
        Self {
            relative_width: 1.0,
            line_width: 1.5,
            show_glowing_indicator: true,
            indicator_width: 6.0,
            glowing_scale_effect: 5.0,
            glowing_duration: 0.8,
            delay_between_glows: 0.5,
            segment_animation_duration: 0.1,
            laser_mode,
            use_custom_indicator: false,
            adjust_top: false,
            adjust_bottom: false,
            adjust_leading: false,
            adjust_trailing: false,
            indicator_mounted: true,
        }
    }

    pub fn get(&self, id: ControlId) -> ControlValue {
        use ControlValue::{Flag, Number};
        match id {
            ControlId::RelativeWidth => Number(self.relative_width),
            ControlId::UseCustomIndicator => Flag(self.use_custom_indicator),
            ControlId::ShowGlowingIndicator => Flag(self.show_glowing_indicator),
            ControlId::LineWidth => Number(self.line_width),
            ControlId::AdjustTop => Flag(self.adjust_top),
            ControlId::AdjustBottom => Flag(self.adjust_bottom),
            ControlId::AdjustLeading => Flag(self.adjust_leading),
            ControlId::AdjustTrailing => Flag(self.adjust_trailing),
            ControlId::IndicatorWidth => Number(self.indicator_width),
            ControlId::SegmentAnimationDuration => Number(self.segment_animation_duration),
            ControlId::GlowingScaleEffect => Number(self.glowing_scale_effect),
            ControlId::GlowingDuration => Number(self.glowing_duration),
            ControlId::DelayBetweenGlows => Number(self.delay_between_glows),
        }
    }

    /// Store `value` in the field bound to `id`. Returns false when the value
    /// kind does not match the control.
    pub fn set(&mut self, id: ControlId, value: ControlValue) -> bool {
        match (id, value) {
            (ControlId::RelativeWidth, ControlValue::Number(v)) => self.relative_width = v,
            (ControlId::LineWidth, ControlValue::Number(v)) => self.line_width = v,
            (ControlId::IndicatorWidth, ControlValue::Number(v)) => self.indicator_width = v,
            (ControlId::SegmentAnimationDuration, ControlValue::Number(v)) => {
                self.segment_animation_duration = v
            }
            (ControlId::GlowingScaleEffect, ControlValue::Number(v)) => {
                self.glowing_scale_effect = v
            }
            (ControlId::GlowingDuration, ControlValue::Number(v)) => self.glowing_duration = v,
            (ControlId::DelayBetweenGlows, ControlValue::Number(v)) => {
                self.delay_between_glows = v
            }
            (ControlId::UseCustomIndicator, ControlValue::Flag(b)) => self.use_custom_indicator = b,
            (ControlId::ShowGlowingIndicator, ControlValue::Flag(b)) => {
                self.show_glowing_indicator = b
            }
            (ControlId::AdjustTop, ControlValue::Flag(b)) => self.adjust_top = b,
            (ControlId::AdjustBottom, ControlValue::Flag(b)) => self.adjust_bottom = b,
            (ControlId::AdjustLeading, ControlValue::Flag(b)) => self.adjust_leading = b,
            (ControlId::AdjustTrailing, ControlValue::Flag(b)) => self.adjust_trailing = b,
            _ => return false,
        }
        true
    }

    pub fn adjusted_edges(&self) -> Edges {
        Edges::from_flags(
            self.adjust_top,
            self.adjust_bottom,
            self.adjust_leading,
            self.adjust_trailing,
        )
    }

    /// Rebuild the plot configuration from the current values.
    pub fn plot_config(&self) -> PlotConfig {
        PlotConfig::default().custom(|c| {
            c.plot_line_width = self.line_width;
            c.glowing_indicator_width = self.indicator_width;
            c.glowing_indicator_background_scale = self.glowing_scale_effect;
            c.glowing_indicator_glow_duration = self.glowing_duration;
            c.glowing_indicator_delay_between_glow = self.delay_between_glows;
            c.segment_selection_animation_duration = self.segment_animation_duration;
            c.use_laser_light_style = self.laser_mode;
            c.adjusted_edges = self.adjusted_edges();
        })
    }

    /// The indicator is drawn only while the user wants it and it is mounted.
    pub fn indicator_visible(&self) -> bool {
        self.show_glowing_indicator && self.indicator_mounted
    }
}
