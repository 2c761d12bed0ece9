//! src/panels/controls.rs
//!
//! Controls panel: section headers, toggles and slider tracks for every
//! customization option, scrolled so the focused row stays visible.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::demo::controls::{ControlKind, ControlValue, Row, rows};
use crate::demo::{ControlId, DemoScreen};
use crate::ui::{Panel, PanelId};

/// Columns taken by the focus marker.
const MARKER_WIDTH: u16 = 2;
/// Columns reserved for a slider caption before its track.
pub const LABEL_WIDTH: u16 = 32;
/// Narrowest track worth drawing.
const MIN_TRACK: u16 = 4;

/// What a click in the controls panel landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlHit {
    pub id: ControlId,
    /// Position along the slider track, when the click hit one.
    pub ratio: Option<f64>,
}

/// First visible row so that the focused control is on screen.
fn scroll_offset(rows: &[Row], focused: ControlId, visible: u16) -> usize {
    let visible = visible as usize;
    let focus_row = rows
        .iter()
        .position(|r| *r == Row::Control(focused))
        .unwrap_or(0);
    if visible == 0 || focus_row < visible {
        0
    } else {
        focus_row + 1 - visible
    }
}

fn inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Track geometry (x, width) inside `inner`, if there is room for one.
fn track(inner: Rect) -> Option<(u16, u16)> {
    let width = inner.width.saturating_sub(MARKER_WIDTH + LABEL_WIDTH + 1);
    (width >= MIN_TRACK).then(|| (inner.x + MARKER_WIDTH + LABEL_WIDTH + 1, width))
}

/// Map a click at (`column`, `row`) inside the panel `area` to a control.
pub fn hit_test(area: Rect, focused: ControlId, column: u16, row: u16) -> Option<ControlHit> {
    let inner = inner(area);
    if row < inner.y || row >= inner.y + inner.height || column < inner.x {
        return None;
    }
    let rows = rows();
    let offset = scroll_offset(&rows, focused, inner.height);
    let index = offset + (row - inner.y) as usize;
    let Row::Control(id) = *rows.get(index)? else {
        return None;
    };

    let ratio = match (id.spec().is_slider(), track(inner)) {
        (true, Some((x, width))) if column >= x => {
            let span = (width - 1).max(1) as f64;
            Some(((column - x) as f64 / span).clamp(0.0, 1.0))
        }
        _ => None,
    };
    Some(ControlHit { id, ratio })
}

/// Renders the control list of a [`DemoScreen`].
pub struct ControlsPanel<'a> {
    pub screen: &'a DemoScreen,
}

impl<'a> ControlsPanel<'a> {
    pub fn new(screen: &'a DemoScreen) -> Self {
        Self { screen }
    }

    fn control_line(&self, id: ControlId, track: Option<(u16, u16)>) -> Line<'static> {
        let spec = id.spec();
        let focused = self.screen.focused() == id;
        let marker = if focused { "> " } else { "  " };
        let caption_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let value = self.screen.state.get(id);
        let mut spans = vec![Span::styled(marker, caption_style)];
        match (spec.kind, value) {
            (ControlKind::Toggle, ControlValue::Flag(on)) => {
                let check = if on { "[x] " } else { "[ ] " };
                spans.push(Span::styled(check, Style::default().fg(Color::Cyan)));
                spans.push(Span::styled(spec.caption(value), caption_style));
            }
            (ControlKind::Slider { .. }, ControlValue::Number(v)) => {
                let caption = spec.caption(value);
                spans.push(Span::styled(
                    format!("{caption:<width$} ", width = LABEL_WIDTH as usize),
                    caption_style,
                ));
                if let Some((_, width)) = track {
                    spans.extend(slider_track(spec.ratio(v), width));
                }
            }
            _ => spans.push(Span::raw(spec.caption(value))),
        }
        Line::from(spans)
    }
}

fn slider_track(ratio: f64, width: u16) -> Vec<Span<'static>> {
    let width = width as usize;
    let knob = ((width - 1) as f64 * ratio).round() as usize;
    vec![
        Span::styled("━".repeat(knob), Style::default().fg(Color::Green)),
        Span::styled("●", Style::default().fg(Color::White)),
        Span::styled(
            "─".repeat(width - 1 - knob),
            Style::default().fg(Color::DarkGray),
        ),
    ]
}

impl Panel for ControlsPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Controls").borders(Borders::ALL);
        let inner = block.inner(area);
        let track = track(inner);
        let rows = rows();

        let lines: Vec<Line> = rows
            .iter()
            .map(|row| match row {
                Row::Header(section) => Line::styled(
                    section.title(),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Row::Note(text) => Line::styled(
                    format!("  {text}"),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
                Row::Control(id) => self.control_line(*id, track),
            })
            .collect();

        let offset = scroll_offset(&rows, self.screen.focused(), inner.height);
        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .scroll((offset as u16, 0)),
            area,
        );
    }

    fn id(&self) -> Option<PanelId> {
        Some(PanelId::Controls)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::demo::DemoState;

    fn screen() -> DemoScreen {
        DemoScreen::new(DemoState::new(false), Duration::from_millis(100))
    }

    fn render(screen: &DemoScreen, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                ControlsPanel::new(screen).draw(f, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn lists_every_control_with_formatted_values() {
        let s = screen();
        let screen_text = render(&s, 60, 22).join("\n");
        assert!(screen_text.contains("Configure via props"));
        assert!(screen_text.contains("> Relative width 1.00"));
        assert!(screen_text.contains("[x] Show glowing indicator"));
        assert!(screen_text.contains("Line width 1.50"));
        assert!(screen_text.contains("[ ] Top"));
        assert!(screen_text.contains("Segment animation duration 0.10"));
        assert!(screen_text.contains("Delay between glows 0.50"));
    }

    #[test]
    fn focused_row_scrolls_into_view() {
        let mut s = screen();
        s.focus(ControlId::DelayBetweenGlows);
        let lines = render(&s, 60, 8);
        // 6 inner rows; the focused control is the last of 17 rows
        assert!(lines[6].contains("> Delay between glows 0.50"));
        assert!(!lines.join("\n").contains("Relative width"));
    }

    #[test]
    fn clicks_map_to_rows_and_track_ratio() {
        let s = screen();
        let area = Rect::new(0, 0, 60, 22);
        // row 0 of the inner area is the first header
        assert_eq!(hit_test(area, s.focused(), 5, 1), None);
        assert_eq!(
            hit_test(area, s.focused(), 5, 3),
            Some(ControlHit {
                id: ControlId::UseCustomIndicator,
                ratio: None
            })
        );

        let (x, width) = track(inner(area)).unwrap();
        let start = hit_test(area, s.focused(), x, 6).unwrap();
        assert_eq!(start.id, ControlId::LineWidth);
        assert_eq!(start.ratio, Some(0.0));
        let end = hit_test(area, s.focused(), x + width - 1, 6).unwrap();
        assert_eq!(end.ratio, Some(1.0));

        // caption columns focus without moving the slider
        assert_eq!(hit_test(area, s.focused(), 4, 6).unwrap().ratio, None);
        assert_eq!(hit_test(area, s.focused(), 5, 0), None);
    }

    #[test]
    fn narrow_panel_has_no_track() {
        assert_eq!(track(inner(Rect::new(0, 0, 30, 10))), None);
    }
}
