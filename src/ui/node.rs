//! src/ui/node.rs
//!
//! Recursive layout Node + Panel trait used across the UI.
//!
//! Drawing a node tree also records where each identified panel landed, so
//! mouse events can be routed back to the panel under the pointer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Panels that take pointer input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelId {
    Plot,
    Controls,
}

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);

    /// Identity for hit testing; anonymous panels are never hit.
    fn id(&self) -> Option<PanelId> {
        None
    }
}

/// Screen areas of the identified panels from the last draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitMap {
    areas: Vec<(PanelId, Rect)>,
}

impl HitMap {
    pub fn record(&mut self, id: PanelId, area: Rect) {
        self.areas.push((id, area));
    }

    /// Topmost panel containing the cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<PanelId> {
        let pos = Position::new(column, row);
        self.areas
            .iter()
            .rev()
            .find(|(_, area)| area.contains(pos))
            .map(|(id, _)| *id)
    }

    pub fn area(&self, id: PanelId) -> Option<Rect> {
        self.areas
            .iter()
            .rev()
            .find(|(panel, _)| *panel == id)
            .map(|(_, area)| *area)
    }
}

/// Node tree used to compose the UI each frame.
pub enum Node<'a> {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node<'a>>,
    },
    Leaf {
        panel: Box<dyn Panel + 'a>,
    },
}

impl Node<'_> {
    /// Draw the node into the given area, recording panel areas in `hits`.
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect, hits: &mut HitMap) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk, hits);
                }
            }
            Node::Leaf { panel } => {
                if let Some(id) = panel.id() {
                    hits.record(id, area);
                }
                panel.draw(f, area);
            }
        }
    }
}

/// Helper: create a group node.
pub fn group<'a>(
    direction: Direction,
    constraints: Vec<Constraint>,
    children: Vec<Node<'a>>,
) -> Node<'a> {
    Node::Group {
        direction,
        constraints,
        children,
    }
}

/// Helper: create a leaf node.
pub fn leaf<'a>(panel: impl Panel + 'a) -> Node<'a> {
    Node::Leaf {
        panel: Box::new(panel),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    struct Blank(Option<PanelId>);

    impl Panel for Blank {
        fn draw(&self, _f: &mut Frame<'_>, _area: Rect) {}

        fn id(&self) -> Option<PanelId> {
            self.0
        }
    }

    #[test]
    fn records_identified_leaves() {
        let root = group(
            Direction::Horizontal,
            vec![Constraint::Percentage(50), Constraint::Percentage(50)],
            vec![
                leaf(Blank(Some(PanelId::Plot))),
                group(
                    Direction::Vertical,
                    vec![Constraint::Length(2), Constraint::Min(0)],
                    vec![leaf(Blank(None)), leaf(Blank(Some(PanelId::Controls)))],
                ),
            ],
        );

        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        let mut hits = HitMap::default();
        terminal
            .draw(|f| {
                let area = f.area();
                root.draw(f, area, &mut hits);
            })
            .unwrap();

        assert_eq!(hits.area(PanelId::Plot), Some(Rect::new(0, 0, 10, 10)));
        assert_eq!(hits.area(PanelId::Controls), Some(Rect::new(10, 2, 10, 8)));
        assert_eq!(hits.hit(3, 3), Some(PanelId::Plot));
        assert_eq!(hits.hit(15, 5), Some(PanelId::Controls));
        assert_eq!(hits.hit(15, 0), None);
    }
}
