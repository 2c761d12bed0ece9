//! src/panels/title.rs
//!
//! Header panel: screen title plus the current selection and edge set.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::graph::Edges;

pub struct TitlePanel {
    pub title: String,
    pub selection: Option<usize>,
    pub edges: Edges,
}

impl TitlePanel {
    pub fn new(title: &str, selection: Option<usize>, edges: Edges) -> Self {
        Self {
            title: title.to_string(),
            selection,
            edges,
        }
    }

    fn status(&self) -> String {
        let selected = match self.selection {
            Some(i) => i.to_string(),
            None => "none".to_string(),
        };
        format!("selected index: {selected}  adjusted edges: {}", self.edges)
    }
}

impl crate::ui::Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                self.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(self.status(), Style::default().fg(Color::DarkGray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
