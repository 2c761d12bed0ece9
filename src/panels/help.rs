//! src/panels/help.rs
//!
//! Footer listing the key and mouse bindings.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// (keys, action) pairs shown in the footer.
pub const BINDINGS: &[(&str, &str)] = &[
    ("↑/↓ k/j tab", "focus"),
    ("←/→ h/l", "adjust (shift ×10)"),
    ("space/enter", "toggle"),
    ("r", "reload indicator"),
    ("esc", "clear selection"),
    ("drag plot", "select"),
    ("click control", "focus/toggle/set"),
    ("q", "quit"),
];

pub struct HelpPanel;

impl HelpPanel {
    fn line() -> Line<'static> {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let mut spans = Vec::with_capacity(BINDINGS.len() * 3);
        for (i, (keys, action)) in BINDINGS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*keys, key));
            spans.push(Span::raw(format!(" {action}")));
        }
        Line::from(spans)
    }
}

impl crate::ui::Panel for HelpPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(Self::line())
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Keys").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::ui::Panel;

    #[test]
    fn footer_lists_every_binding() {
        let text: String = HelpPanel::line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        for key in ["k/j", "h/l", "enter", "esc", "click control", "shift ×10", "q"] {
            assert!(text.contains(key), "missing {key}");
        }
    }

    #[test]
    fn wraps_inside_the_block() {
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                HelpPanel.draw(f, area);
            })
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Keys"));
        assert!(screen.contains("focus"));
    }
}
