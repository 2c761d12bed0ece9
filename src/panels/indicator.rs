//! src/panels/indicator.rs
//!
//! Latest-value indicator variants drawn at the last sample of the plot.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
    widgets::canvas::{Context, Points},
};

use super::plot::CanvasGeometry;
use super::shade::mix;
use crate::graph::PlotConfig;
use crate::graph::anim::GlowFrame;

/// What to draw at the latest sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatestValueIndicator {
    /// Solid core with a pulsing ring.
    Glowing,
    /// Caller-supplied text in place of the glow.
    Custom(String),
}

impl LatestValueIndicator {
    pub fn custom(text: impl Into<String>) -> Self {
        Self::Custom(text.into())
    }

    /// Draw the indicator centred on `anchor` (data coordinates).
    pub fn draw(
        &self,
        ctx: &mut Context<'_>,
        geometry: &CanvasGeometry,
        anchor: (f64, f64),
        glow: Option<GlowFrame>,
        config: &PlotConfig,
        color: Color,
    ) {
        match self {
            Self::Glowing => {
                let core = (config.indicator_thickness_dots() as f64 / 2.0).max(0.5);
                if let Some(frame) = glow.filter(|g| g.intensity > 0.0) {
                    let ring = geometry.ring(anchor, core * frame.scale);
                    ctx.draw(&Points {
                        coords: &ring,
                        color: mix(Color::Black, color, frame.intensity),
                    });
                }
                let disc = geometry.disc(anchor, core);
                ctx.draw(&Points {
                    coords: &disc,
                    color,
                });
            }
            Self::Custom(text) => {
                let width = geometry.columns_to_x(text.chars().count());
                let x = (anchor.0 - width).max(geometry.x_bounds[0]);
                ctx.print(
                    x,
                    anchor.1,
                    Line::styled(
                        text.clone(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        }
    }
}
