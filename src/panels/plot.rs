//! src/panels/plot.rs
//!
//! Interactive line plot: per-segment colouring, a latest-value indicator, a
//! scrubbable selection with a floating label, and a value readout in the
//! columns the plot does not occupy.
//!
//! The plot owns its samples and segment boundaries. Everything that changes
//! from frame to frame (configuration, selection, indicator variant) arrives
//! through [`PlotProps`], so the host rebuilds the props instead of mutating
//! the plot.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::ops::Range;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};
use tracing::{debug, info};

use crate::graph::anim::{GlowAnimation, GlowFrame};
use crate::graph::shared::{GestureState, PlotLayout, PlotShared, SharedPlot};
use crate::graph::{Edges, PlotConfig, PlotError, Samples, SegmentBoundaries};
use crate::panels::indicator::LatestValueIndicator;
use crate::panels::shade::mix;
use crate::ui::{Panel, PanelId};

/// Invoked with the sample index under the pointer.
pub type SelectCallback = Box<dyn FnMut(usize)>;

/// Builds the floating label shown at the selected sample.
pub type LabelFactory = Box<dyn Fn(f64) -> Line<'static>>;

/// Per-frame inputs of the plot.
#[derive(Clone, Debug)]
pub struct PlotProps {
    pub config: PlotConfig,
    /// Fraction of the horizontal space given to the line; the rest holds
    /// the value readout. Clamped to [0, 1].
    pub occupied_width: f64,
    pub show_glowing_indicator: bool,
    /// Mount generation chosen by the host. A new value remounts the
    /// indicator even when no hidden frame was drawn in between.
    pub mount_generation: u64,
    pub indicator: LatestValueIndicator,
    /// Host-owned selection.
    pub selection: Option<usize>,
    pub color: Color,
    pub now: Instant,
}

pub struct InteractiveLinePlot {
    samples: Samples,
    segments: SegmentBoundaries,
    shared: SharedPlot,
    on_select: SelectCallback,
    value_label: LabelFactory,
}

impl InteractiveLinePlot {
    /// Create a plot over `samples`. Fails when `segments` were validated
    /// against a different sample count.
    pub fn new(
        samples: Samples,
        segments: SegmentBoundaries,
        now: Instant,
    ) -> Result<Self, PlotError> {
        if segments.count() != samples.len() {
            return Err(PlotError::SampleCountMismatch {
                expected: segments.count(),
                actual: samples.len(),
            });
        }
        Ok(Self {
            samples,
            segments,
            shared: Rc::new(RefCell::new(PlotShared::new(now))),
            on_select: Box::new(|_| {}),
            value_label: Box::new(default_label),
        })
    }

    pub fn on_select(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_select = Box::new(callback);
        self
    }

    pub fn value_label(mut self, factory: impl Fn(f64) -> Line<'static> + 'static) -> Self {
        self.value_label = Box::new(factory);
        self
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn segments(&self) -> &SegmentBoundaries {
        &self.segments
    }

    pub fn layout(&self) -> Option<PlotLayout> {
        self.shared.borrow().layout
    }

    /// True between a press inside the chart and its release.
    pub fn is_scrubbing(&self) -> bool {
        self.shared.borrow().gesture == GestureState::Scrubbing
    }

    /// Panel drawing this plot with `props`.
    pub fn panel(&self, props: PlotProps) -> PlotPanel<'_> {
        PlotPanel { plot: self, props }
    }

    /// Feed a mouse event. Presses inside the chart start a scrub; every
    /// press or drag update while scrubbing reports exactly one index through
    /// the selection callback. Releasing ends the scrub and leaves the
    /// selection to the host.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<usize> {
        let index = {
            let mut shared = self.shared.borrow_mut();
            let layout = shared.layout?;
            match event.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    let pos = Position::new(event.column, event.row);
                    if self.samples.is_empty() || !layout.chart.contains(pos) {
                        return None;
                    }
                    shared.gesture = GestureState::Scrubbing;
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    if shared.gesture != GestureState::Scrubbing {
                        return None;
                    }
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    if shared.gesture == GestureState::Scrubbing {
                        debug!(last = ?shared.last_reported, "scrub released");
                    }
                    shared.gesture = GestureState::Idle;
                    return None;
                }
                _ => return None,
            }
            let index = layout.index_at_column(event.column, self.samples.len())?;
            shared.last_reported = Some(index);
            index
        };

        debug!(index, "sample selected");
        (self.on_select)(index);
        Some(index)
    }
}

fn default_label(value: f64) -> Line<'static> {
    Line::from(format!("{value:.2}"))
}

/// Split the inner plot area into the chart and the readout columns.
pub fn split_occupied(inner: Rect, occupied_width: f64) -> (Rect, Rect) {
    let frac = if occupied_width.is_finite() {
        occupied_width.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let chart_width = ((inner.width as f64) * frac).round() as u16;
    let chart = Rect {
        width: chart_width,
        ..inner
    };
    let readout = Rect {
        x: inner.x + chart_width,
        width: inner.width - chart_width,
        ..inner
    };
    (chart, readout)
}

/// Mapping between data coordinates and braille dots for one chart area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasGeometry {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Data units covered by one dot horizontally.
    pub dot_w: f64,
    /// Data units covered by one dot vertically.
    pub dot_h: f64,
}

impl CanvasGeometry {
    /// Fit the samples into `chart`, widening the bounds by half a stroke on
    /// every edge listed in `config.adjusted_edges`. Edges that are not
    /// adjusted clip the outer half of a thick stroke.
    pub fn fit(samples: &Samples, config: &PlotConfig, chart: Rect) -> Self {
        let n = samples.len();
        let (x0, x1) = if n > 1 {
            (0.0, (n - 1) as f64)
        } else {
            (-0.5, 0.5)
        };
        let (y0, y1) = value_range(samples);

        let cols = (chart.width as f64 * 2.0).max(1.0);
        let rows = (chart.height as f64 * 4.0).max(1.0);
        let half = config.line_thickness_dots() as f64 / 2.0;
        let pad_x = half * (x1 - x0) / cols;
        let pad_y = half * (y1 - y0) / rows;

        let edges = config.adjusted_edges;
        let mut x_bounds = [x0, x1];
        let mut y_bounds = [y0, y1];
        if edges.contains(Edges::LEADING) {
            x_bounds[0] -= pad_x;
        }
        if edges.contains(Edges::TRAILING) {
            x_bounds[1] += pad_x;
        }
        if edges.contains(Edges::BOTTOM) {
            y_bounds[0] -= pad_y;
        }
        if edges.contains(Edges::TOP) {
            y_bounds[1] += pad_y;
        }

        Self {
            x_bounds,
            y_bounds,
            dot_w: (x_bounds[1] - x_bounds[0]) / cols,
            dot_h: (y_bounds[1] - y_bounds[0]) / rows,
        }
    }

    /// Draw a stroke `thickness` dots wide as parallel lines offset along the
    /// segment normal.
    pub fn thick_line(
        &self,
        ctx: &mut Context<'_>,
        from: (f64, f64),
        to: (f64, f64),
        thickness: usize,
        color: Color,
    ) {
        let dx = (to.0 - from.0) / self.dot_w;
        let dy = (to.1 - from.1) / self.dot_h;
        let len = dx.hypot(dy);
        let normal = if len > 1e-9 {
            (-dy / len, dx / len)
        } else {
            (0.0, 1.0)
        };
        let centre = (thickness.max(1) as f64 - 1.0) / 2.0;
        for k in 0..thickness.max(1) {
            let off = k as f64 - centre;
            let ox = normal.0 * off * self.dot_w;
            let oy = normal.1 * off * self.dot_h;
            ctx.draw(&CanvasLine {
                x1: from.0 + ox,
                y1: from.1 + oy,
                x2: to.0 + ox,
                y2: to.1 + oy,
                color,
            });
        }
    }

    /// Dots of a filled disc of `radius` dots.
    pub fn disc(&self, centre: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
        let reach = radius.ceil() as i64;
        let mut coords = Vec::new();
        for iy in -reach..=reach {
            for ix in -reach..=reach {
                let (fx, fy) = (ix as f64, iy as f64);
                if fx * fx + fy * fy <= radius * radius {
                    coords.push((centre.0 + fx * self.dot_w, centre.1 + fy * self.dot_h));
                }
            }
        }
        coords
    }

    /// Dots on a circle of `radius` dots.
    pub fn ring(&self, centre: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
        let steps = ((TAU * radius * 2.0).ceil() as usize).max(16);
        (0..steps)
            .map(|i| {
                let a = TAU * i as f64 / steps as f64;
                (
                    centre.0 + radius * a.cos() * self.dot_w,
                    centre.1 + radius * a.sin() * self.dot_h,
                )
            })
            .collect()
    }

    /// Horizontal data span of `columns` terminal cells.
    pub fn columns_to_x(&self, columns: usize) -> f64 {
        columns as f64 * 2.0 * self.dot_w
    }
}

/// Value bounds; flat data gets magnitude-based padding so the line stays visible.
fn value_range(samples: &Samples) -> (f64, f64) {
    match samples.bounds() {
        None => (0.0, 1.0),
        Some((mn, mx)) if (mx - mn).abs() < f64::EPSILON => {
            let pad = mn.abs().max(1.0) * 0.1;
            (mn - pad, mx + pad)
        }
        Some(bounds) => bounds,
    }
}

/// Copy a label into a line that borrows nothing.
fn owned_line<'a>(line: &Line<'_>) -> Line<'a> {
    let spans: Vec<Span<'a>> = line
        .spans
        .iter()
        .map(|s| Span::styled(s.content.to_string(), s.style))
        .collect();
    Line::from(spans).style(line.style)
}

pub struct PlotPanel<'a> {
    plot: &'a InteractiveLinePlot,
    props: PlotProps,
}

impl PlotPanel<'_> {
    /// Remount the indicator on the rising edge of `show_glowing_indicator`
    /// or when the host moves to a new mount generation, capturing the glow
    /// timings of the current config.
    fn track_mount(&self, shared: &mut PlotShared) {
        let show = self.props.show_glowing_indicator;
        let generation = self.props.mount_generation;
        if show && (!shared.indicator_mounted || shared.mount_generation != generation) {
            let glow = GlowAnimation::mount(&self.props.config, self.props.now);
            info!(
                generation,
                duration = ?glow.duration,
                delay = ?glow.delay,
                scale = glow.background_scale,
                "indicator mounted"
            );
            shared.glow = Some(glow);
            shared.mount_generation = generation;
        } else if !show && shared.indicator_mounted {
            debug!("indicator unmounted");
            shared.glow = None;
        }
        shared.indicator_mounted = show;
    }

    fn draw_readout(&self, f: &mut Frame<'_>, area: Rect) {
        let samples = self.plot.samples();
        let (value, caption) = match self.props.selection.and_then(|i| samples.get(i).map(|v| (i, v))) {
            Some((i, v)) => (v, format!("index {i}")),
            None => (samples.last().unwrap_or(0.0), "latest".to_string()),
        };
        let mut lines: Vec<Line> = Vec::new();
        let top = area.height.saturating_sub(2) / 2;
        for _ in 0..top {
            lines.push(Line::raw(""));
        }
        lines.push(Line::styled(
            format!("{value:.2}"),
            Style::default()
                .fg(self.props.color)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(caption, Style::default().fg(Color::DarkGray)));
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

impl Panel for PlotPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Line plot").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let plot = self.plot;
        let props = &self.props;

        let mut shared = plot.shared.borrow_mut();
        if plot.samples.is_empty() {
            shared.layout = None;
            shared.gesture = GestureState::Idle;
            f.render_widget(
                Paragraph::new("no samples").alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let (chart, readout) = split_occupied(inner, props.occupied_width);
        let geometry = CanvasGeometry::fit(&plot.samples, &props.config, chart);
        let layout = PlotLayout {
            chart,
            readout,
            x_bounds: geometry.x_bounds,
        };
        shared.layout = Some(layout);
        self.track_mount(&mut shared);

        let ranges: Vec<Range<usize>> = plot.segments.ranges();
        let active = props.selection.and_then(|i| plot.segments.segment_of(i));
        if shared.highlight.retarget(active, props.now) {
            debug!(segment = ?active, "segment highlight retargeted");
        }
        let fade = props.config.segment_animation_duration();
        let weights: Vec<f64> = (0..ranges.len())
            .map(|s| shared.highlight.weight(s, props.now, fade))
            .collect();
        let glow: Option<GlowFrame> = shared.glow.as_ref().map(|g| g.frame(props.now));
        drop(shared);

        if layout.chart.width > 0 && layout.chart.height > 0 {
            let values = plot.samples.as_slice();
            let selected = props
                .selection
                .and_then(|i| plot.samples.get(i).map(|v| (i, v, (plot.value_label)(v))));
            let dim = mix(props.color, Color::Black, 0.7);

            let canvas = Canvas::default()
                .marker(Marker::Braille)
                .x_bounds(geometry.x_bounds)
                .y_bounds(geometry.y_bounds)
                .paint(|ctx| {
                    for (s, range) in ranges.iter().enumerate() {
                        let color = mix(dim, props.color, weights[s]);
                        draw_segment(ctx, &geometry, values, range.clone(), color, &props.config);
                    }
                    if values.len() == 1 && values[0].is_finite() {
                        ctx.draw(&Points {
                            coords: &[(0.0, values[0])],
                            color: props.color,
                        });
                    }

                    ctx.layer();
                    if props.show_glowing_indicator {
                        let last = values.len() - 1;
                        if values[last].is_finite() {
                            props.indicator.draw(
                                ctx,
                                &geometry,
                                (last as f64, values[last]),
                                glow,
                                &props.config,
                                props.color,
                            );
                        }
                    }

                    if let Some((i, v, label)) = &selected {
                        ctx.layer();
                        draw_selection(ctx, &geometry, (*i as f64, *v), label, props.color);
                    }
                });
            f.render_widget(canvas, layout.chart);
        }

        if layout.readout.width > 0 && layout.readout.height > 0 {
            self.draw_readout(f, layout.readout);
        }
    }

    fn id(&self) -> Option<PanelId> {
        Some(PanelId::Plot)
    }
}

fn draw_segment(
    ctx: &mut Context<'_>,
    geometry: &CanvasGeometry,
    values: &[f64],
    range: Range<usize>,
    color: Color,
    config: &PlotConfig,
) {
    // the segment owns the link into the next segment's first sample
    let end = range.end.min(values.len().saturating_sub(1));
    let thickness = config.line_thickness_dots();
    for i in range.start..end {
        let (a, b) = (values[i], values[i + 1]);
        if !a.is_finite() || !b.is_finite() {
            continue;
        }
        let from = (i as f64, a);
        let to = ((i + 1) as f64, b);
        if config.use_laser_light_style {
            geometry.thick_line(ctx, from, to, thickness.max(2), mix(color, Color::Black, 0.55));
            geometry.thick_line(ctx, from, to, 1, mix(color, Color::White, 0.6));
        } else {
            geometry.thick_line(ctx, from, to, thickness, color);
        }
    }
}

fn draw_selection(
    ctx: &mut Context<'_>,
    geometry: &CanvasGeometry,
    point: (f64, f64),
    label: &Line<'static>,
    color: Color,
) {
    let [x0, x1] = geometry.x_bounds;
    let [y0, y1] = geometry.y_bounds;
    ctx.draw(&CanvasLine {
        x1: point.0,
        y1: y0,
        x2: point.0,
        y2: y1,
        color: mix(color, Color::White, 0.5),
    });
    if point.1.is_finite() {
        let marker = geometry.disc(point, 1.0);
        ctx.draw(&Points {
            coords: &marker,
            color: Color::White,
        });
    }

    let width = geometry.columns_to_x(label.width());
    let x = (point.0 - width / 2.0).min(x1 - width).max(x0);
    ctx.print(x, y1, owned_line(label));
}
