//! Labels chat cells as routes, message text or noise from their geometry.
//!
//! Cells of interest have the generic (unknown) role and fixed heights:
//! - Routes ("Bob to Everyone", "You to Bob"): 15 per line
//! - System announcements ("Bob has joined"): 13 per line
//! - Text: 16 per line, 21 with emoji, 39 for emoji-only
//!
//! Three-line announcements and emoji-only text are both multiples of 39.
//! Routes and text are never wider than the row minus 140; announcements are.
//!
//! These values follow Zoom's current rendering and need re-tuning when it
//! changes. Row layouts are logged at debug level for that purpose.

use crate::domain::{Element, Role};
use tracing::debug;

pub const ROUTE_HEIGHT: f64 = 15.0;
pub const ANNOUNCEMENT_LINE_HEIGHT: f64 = 13.0;
pub const ROUTE_TEXT_MIN_PAD_WIDTH: f64 = 140.0;

/// A meaningful cell of a chat row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCell {
    Route(String),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutHeuristics {
    pub route_height: f64,
    pub announcement_line_height: f64,
    /// Minimum gap between row and cell width for routes and text.
    pub route_text_min_pad_width: f64,
}

impl Default for LayoutHeuristics {
    fn default() -> Self {
        Self {
            route_height: ROUTE_HEIGHT,
            announcement_line_height: ANNOUNCEMENT_LINE_HEIGHT,
            route_text_min_pad_width: ROUTE_TEXT_MIN_PAD_WIDTH,
        }
    }
}

impl LayoutHeuristics {
    /// Classify the cells of the row's first composite element, in order.
    pub fn classify_row(&self, row: &Element) -> Vec<ChatCell> {
        debug!(layout = %row.layout_description(), "chat row layout");

        let Some(composite) = row.children.first() else {
            return Vec::new();
        };
        composite
            .children
            .iter()
            .filter_map(|cell| self.classify_cell(row, cell))
            .collect()
    }

    fn classify_cell(&self, row: &Element, cell: &Element) -> Option<ChatCell> {
        if cell.role != Role::Unknown {
            return None;
        }
        let row_width = row.size?.width;
        let cell_size = cell.size?;

        if self.is_announcement(row_width, cell_size.width, cell_size.height) {
            None
        } else if cell_size.height == self.route_height {
            cell.value.clone().map(ChatCell::Route)
        } else {
            cell.value.clone().map(ChatCell::Text)
        }
    }

    fn is_announcement(&self, row_width: f64, cell_width: f64, cell_height: f64) -> bool {
        cell_height == self.announcement_line_height
            || (cell_height % self.announcement_line_height == 0.0
                && row_width - cell_width < self.route_text_min_pad_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(width: f64, height: f64, value: &str) -> Element {
        Element::new(Role::Unknown)
            .sized(width, height)
            .with_value(value)
    }

    fn row(cells: Vec<Element>) -> Element {
        Element::new(Role::Row)
            .sized(400.0, 60.0)
            .with_children(vec![Element::new(Role::Group).at(4.0, 0.0).with_children(cells)])
    }

    #[test]
    fn test_route_and_text() {
        let cells = LayoutHeuristics::default().classify_row(&row(vec![
            cell(120.0, 15.0, "Bob to Everyone"),
            cell(200.0, 16.0, "hello"),
            cell(200.0, 32.0, "two\nlines"),
        ]));
        assert_eq!(
            cells,
            vec![
                ChatCell::Route("Bob to Everyone".into()),
                ChatCell::Text("hello".into()),
                ChatCell::Text("two\nlines".into()),
            ]
        );
    }

    #[test]
    fn test_announcements_are_discarded() {
        let cells = LayoutHeuristics::default().classify_row(&row(vec![
            cell(380.0, 13.0, "Bob has joined"),
            cell(300.0, 13.0, "Alice has left"),
            // Three lines, nearly full width.
            cell(350.0, 39.0, "Messages addressed to \"Meeting Group Chat\" will also appear"),
        ]));
        assert!(cells.is_empty());
    }

    #[test]
    fn test_narrow_emoji_only_text_is_kept() {
        let cells = LayoutHeuristics::default()
            .classify_row(&row(vec![cell(60.0, 39.0, "🎉🎉")]));
        assert_eq!(cells, vec![ChatCell::Text("🎉🎉".into())]);
    }

    #[test]
    fn test_unusable_cells_are_dropped() {
        let no_value = Element::new(Role::Unknown).sized(100.0, 16.0);
        let no_size = Element::new(Role::Unknown).with_value("floating");
        let labelled = Element::new(Role::StaticText)
            .sized(100.0, 16.0)
            .with_value("button");
        let cells = LayoutHeuristics::default().classify_row(&row(vec![no_value, no_size, labelled]));
        assert!(cells.is_empty());
    }

    #[test]
    fn test_row_without_width_yields_nothing() {
        let unsized_row = Element::new(Role::Row).with_children(vec![
            Element::new(Role::Group).with_children(vec![cell(100.0, 16.0, "hi")]),
        ]);
        assert!(LayoutHeuristics::default().classify_row(&unsized_row).is_empty());
    }

    #[test]
    fn test_only_first_composite_is_read() {
        let mut r = row(vec![cell(100.0, 16.0, "first")]);
        r.children
            .push(Element::new(Role::Group).with_children(vec![cell(100.0, 16.0, "second")]));
        assert_eq!(
            LayoutHeuristics::default().classify_row(&r),
            vec![ChatCell::Text("first".into())]
        );
    }

    #[test]
    fn test_custom_heights() {
        let layout = LayoutHeuristics {
            route_height: 17.0,
            ..LayoutHeuristics::default()
        };
        let cells = layout.classify_row(&row(vec![
            cell(100.0, 17.0, "Bob to Me"),
            cell(100.0, 15.0, "now text"),
        ]));
        assert_eq!(
            cells,
            vec![
                ChatCell::Route("Bob to Me".into()),
                ChatCell::Text("now text".into())
            ]
        );
    }
}
