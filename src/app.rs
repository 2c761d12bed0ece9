//! src/app.rs
//!
//! Top-level application: builds the samples and the plot, then runs the
//! terminal loop that draws the customization screen and routes input.
//!
//! Layout: a title row, the plot next to the control list, and a footer with
//! the key bindings. Mouse presses in the plot start a scrub; presses in the
//! control list focus a control, flip a toggle, or move a slider to the
//! clicked position.

use std::io::stdout;
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::{Constraint, Direction};
use ratatui::style::Color;
use ratatui::text::Line;
use tracing::{debug, info, warn};

use crate::cli::DemoArgs;
use crate::demo::{DemoScreen, DemoState};
use crate::graph::{Samples, SegmentBoundaries};
use crate::panels::controls::hit_test;
use crate::panels::{ControlsPanel, HelpPanel, InteractiveLinePlot, TitlePanel};
use crate::ui::{HitMap, PanelId, group, leaf};

const TITLE: &str = "Line plot customization";
const LINE_COLOR: Color = Color::Cyan;

fn build_samples(args: &DemoArgs) -> Samples {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Samples::random(&mut rng, args.samples, 0.0..=100.0)
}

/// Build the plot wired to the screen's selection.
fn build_plot(args: &DemoArgs, screen: &DemoScreen, now: Instant) -> Result<InteractiveLinePlot> {
    let samples = build_samples(args);
    let segments = SegmentBoundaries::stride(samples.len(), args.stride)
        .wrap_err("invalid segment stride")?;
    info!(
        samples = samples.len(),
        segments = segments.starts().len(),
        seed = ?args.seed,
        "plot data ready"
    );

    let on_select = screen.selection_handle();
    let label_selection = screen.selection_handle();
    let plot = InteractiveLinePlot::new(samples, segments, now)?
        .on_select(move |index| on_select.set(Some(index)))
        .value_label(move |value| {
            let index = label_selection.get().map_or(-1, |i| i as i64);
            Line::from(format!("{value:.2}, index {index}"))
        });
    Ok(plot)
}

/// Route a mouse event to the plot or the control list.
fn route_mouse(
    event: MouseEvent,
    hits: &HitMap,
    plot: &mut InteractiveLinePlot,
    screen: &mut DemoScreen,
    now: Instant,
) {
    let target = hits.hit(event.column, event.row);
    if plot.is_scrubbing() || target == Some(PanelId::Plot) {
        plot.handle_mouse(event);
        return;
    }
    if target != Some(PanelId::Controls) || event.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(area) = hits.area(PanelId::Controls) else {
        return;
    };
    let Some(hit) = hit_test(area, screen.focused(), event.column, event.row) else {
        return;
    };
    screen.focus(hit.id);
    if hit.id.spec().is_slider() {
        if let Some(ratio) = hit.ratio {
            screen.set_ratio(hit.id, ratio, now);
        }
    } else {
        screen.toggle(hit.id, now);
    }
}

pub fn run(args: DemoArgs) -> Result<()> {
    let start = Instant::now();
    let mut screen = DemoScreen::new(DemoState::new(args.laser), args.refresh_delay());
    let mut plot = build_plot(&args, &screen, start)?;

    let mut terminal = ratatui::init();
    if let Err(e) = execute!(stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(e).wrap_err("failed to enable mouse capture");
    }
    info!("ui started");

    let result = event_loop(&mut terminal, &args, &mut plot, &mut screen);

    screen.teardown();
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
    info!(elapsed = ?start.elapsed(), "ui stopped");
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    args: &DemoArgs,
    plot: &mut InteractiveLinePlot,
    screen: &mut DemoScreen,
) -> Result<()> {
    let frame_time = args.frame_time();
    let mut running = true;

    while running {
        let frame_start = Instant::now();
        let ran = screen.tick(frame_start);
        if ran > 0 {
            debug!(ran, pending = screen.pending_tasks(), "deferred tasks ran");
        }

        let props = screen.plot_props(frame_start, LINE_COLOR);
        let root = group(
            Direction::Vertical,
            vec![
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ],
            vec![
                leaf(TitlePanel::new(
                    TITLE,
                    screen.selection(),
                    screen.state.adjusted_edges(),
                )),
                group(
                    Direction::Horizontal,
                    vec![Constraint::Percentage(60), Constraint::Percentage(40)],
                    vec![leaf(plot.panel(props)), leaf(ControlsPanel::new(screen))],
                ),
                leaf(HelpPanel),
            ],
        );

        let mut hits = HitMap::default();
        terminal.draw(|f| {
            let area = f.area();
            root.draw(f, area, &mut hits);
        })?;
        drop(root);

        let now = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if screen.handle_key(key, now) {
                        running = false;
                    }
                }
                Event::Mouse(mouse) => route_mouse(mouse, &hits, plot, screen, now),
                _ => {}
            }
        }

        if !running {
            break;
        }

        let wake = frame_wake(frame_start + frame_time, screen.next_deadline());
        let now = Instant::now();
        if wake > now {
            thread::sleep(wake - now);
        }
    }
    Ok(())
}

/// End of the frame, pulled in when a deferred task is due sooner.
fn frame_wake(frame_end: Instant, next_task: Option<Instant>) -> Instant {
    match next_task {
        Some(due) => due.min(frame_end),
        None => frame_end,
    }
}
