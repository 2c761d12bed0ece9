//! src/demo/controls.rs
//!
//! The customization controls: identity, range, step, section, and whether a
//! write has to remount the indicator before it becomes visible.

/// Every control on the customization screen.
///
/// The discriminant doubles as the index into [`CONTROLS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlId {
    RelativeWidth,
    UseCustomIndicator,
    ShowGlowingIndicator,
    LineWidth,
    AdjustTop,
    AdjustBottom,
    AdjustLeading,
    AdjustTrailing,
    IndicatorWidth,
    SegmentAnimationDuration,
    GlowingScaleEffect,
    GlowingDuration,
    DelayBetweenGlows,
}

impl ControlId {
    pub fn spec(self) -> &'static ControlSpec {
        &CONTROLS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Options passed straight to the plot.
    Initializer,
    /// Options carried in the plot configuration.
    Config,
    /// Glow timings, only picked up when the indicator remounts.
    Animation,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Initializer => "Configure via props",
            Section::Config => "Configure via PlotConfig",
            Section::Animation => "Animation config (reloads the indicator)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Slider { min: f64, max: f64, step: f64 },
    Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlValue {
    Number(f64),
    Flag(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSpec {
    pub id: ControlId,
    pub label: &'static str,
    pub kind: ControlKind,
    pub section: Section,
    /// Writes also remount the indicator after a short delay.
    pub refresh: bool,
}

impl ControlSpec {
    const fn slider(
        id: ControlId,
        label: &'static str,
        section: Section,
        (min, max, step): (f64, f64, f64),
        refresh: bool,
    ) -> Self {
        Self {
            id,
            label,
            kind: ControlKind::Slider { min, max, step },
            section,
            refresh,
        }
    }

    const fn toggle(id: ControlId, label: &'static str, section: Section) -> Self {
        Self {
            id,
            label,
            kind: ControlKind::Toggle,
            section,
            refresh: false,
        }
    }

    pub fn is_slider(&self) -> bool {
        matches!(self.kind, ControlKind::Slider { .. })
    }

    /// Clamp a slider value into range; toggles pass through.
    pub fn clamp(&self, value: f64) -> f64 {
        match self.kind {
            ControlKind::Slider { min, max, .. } if value.is_finite() => value.clamp(min, max),
            ControlKind::Slider { min, .. } => min,
            ControlKind::Toggle => value,
        }
    }

    /// Position of `value` along the slider track in [0, 1].
    pub fn ratio(&self, value: f64) -> f64 {
        match self.kind {
            ControlKind::Slider { min, max, .. } if max > min => {
                ((self.clamp(value) - min) / (max - min)).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn from_ratio(&self, ratio: f64) -> f64 {
        match self.kind {
            ControlKind::Slider { min, max, .. } => self.clamp(min + (max - min) * ratio),
            ControlKind::Toggle => 0.0,
        }
    }

    /// `steps` slider steps away from `value`, clamped.
    pub fn stepped(&self, value: f64, steps: i32) -> f64 {
        match self.kind {
            ControlKind::Slider { step, .. } => self.clamp(value + step * steps as f64),
            ControlKind::Toggle => value,
        }
    }

    /// Row text: sliders show their value, toggles just the label.
    pub fn caption(&self, value: ControlValue) -> String {
        match value {
            ControlValue::Number(v) => format!("{} {}", self.label, format_value(v)),
            ControlValue::Flag(_) => self.label.to_string(),
        }
    }
}

/// Slider readout: the value rounded to two decimals.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

use ControlId as C;
use Section as S;

pub const CONTROLS: [ControlSpec; 13] = [
    ControlSpec::slider(C::RelativeWidth, "Relative width", S::Initializer, (0.0, 1.0, 0.05), false),
    ControlSpec::toggle(C::UseCustomIndicator, "Use custom indicator", S::Initializer),
    ControlSpec::toggle(C::ShowGlowingIndicator, "Show glowing indicator", S::Initializer),
    ControlSpec::slider(C::LineWidth, "Line width", S::Config, (1.0, 20.0, 0.5), false),
    ControlSpec::toggle(C::AdjustTop, "Top", S::Config),
    ControlSpec::toggle(C::AdjustBottom, "Bottom", S::Config),
    ControlSpec::toggle(C::AdjustLeading, "Leading", S::Config),
    ControlSpec::toggle(C::AdjustTrailing, "Trailing", S::Config),
    ControlSpec::slider(C::IndicatorWidth, "Indicator width", S::Config, (4.0, 20.0, 0.5), false),
    ControlSpec::slider(
        C::SegmentAnimationDuration,
        "Segment animation duration",
        S::Config,
        (0.01, 0.6, 0.01),
        false,
    ),
    ControlSpec::slider(C::GlowingScaleEffect, "Glowing scale effect", S::Animation, (1.0, 15.0, 0.5), true),
    ControlSpec::slider(C::GlowingDuration, "Glowing duration", S::Animation, (0.1, 2.0, 0.05), true),
    ControlSpec::slider(C::DelayBetweenGlows, "Delay between glows", S::Animation, (0.01, 1.0, 0.01), true),
];

/// One line of the controls list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    Header(Section),
    Note(&'static str),
    Control(ControlId),
}

pub const EDGE_NOTE: &str = "Adjusted stroke edges (raise line width to see the effect)";

/// Rows in display order: a header at every section change and a note above
/// the edge toggles.
pub fn rows() -> Vec<Row> {
    let mut out = Vec::with_capacity(CONTROLS.len() + 4);
    let mut section: Option<Section> = None;
    for spec in &CONTROLS {
        if section != Some(spec.section) {
            out.push(Row::Header(spec.section));
            section = Some(spec.section);
        }
        if spec.id == ControlId::AdjustTop {
            out.push(Row::Note(EDGE_NOTE));
        }
        out.push(Row::Control(spec.id));
    }
    out
}
