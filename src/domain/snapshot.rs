//! Structural read of the chat surface at one instant.
//!
//! The chat table is a list of rows. Each row's first child is a composite
//! element whose children are the text cells.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Accessibility role of an element. Only `Unknown` cells carry chat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Generic/unlabeled role.
    #[default]
    Unknown,
    Row,
    Cell,
    Group,
    StaticText,
    #[serde(other)]
    Other,
}

impl Role {
    fn as_str(&self) -> &'static str {
        match self {
            Role::Unknown => "unknown",
            Role::Row => "row",
            Role::Cell => "cell",
            Role::Group => "group",
            Role::StaticText => "static_text",
            Role::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A node of the UI element tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point { x, y });
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size { width, height });
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Canonical description of roles, positions and sizes. Values are excluded,
    /// so two reads of an unchanged layout describe identically.
    pub fn layout_description(&self) -> String {
        let mut out = String::new();
        self.write_layout(&mut out);
        out
    }

    fn write_layout(&self, out: &mut String) {
        out.push_str(self.role.as_str());
        match self.position {
            Some(p) => {
                let _ = write!(out, "@({},{})", p.x, p.y);
            }
            None => out.push_str("@(-)"),
        }
        match self.size {
            Some(s) => {
                let _ = write!(out, "[{}x{}]", s.width, s.height);
            }
            None => out.push_str("[-]"),
        }
        if !self.children.is_empty() {
            out.push('{');
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    out.push(';');
                }
                child.write_layout(out);
            }
            out.push('}');
        }
    }
}

/// The chat table: rows in display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub rows: Vec<Element>,
}

impl Snapshot {
    pub fn new(rows: Vec<Element>) -> Self {
        Self { rows }
    }

    pub fn layout_description(&self) -> String {
        self.rows
            .iter()
            .map(Element::layout_description)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_description_ignores_values() {
        let a = Element::new(Role::Unknown).at(0.0, 1.0).sized(10.0, 15.0).with_value("Bob");
        let b = Element::new(Role::Unknown).at(0.0, 1.0).sized(10.0, 15.0).with_value("Alice");
        assert_eq!(a.layout_description(), b.layout_description());
    }

    #[test]
    fn test_layout_description_tracks_geometry() {
        let a = Element::new(Role::Row).sized(300.0, 40.0).with_children(vec![
            Element::new(Role::Unknown).at(4.0, 0.0).sized(100.0, 16.0),
        ]);
        let b = Element::new(Role::Row).sized(300.0, 40.0).with_children(vec![
            Element::new(Role::Unknown).at(4.0, 0.0).sized(100.0, 32.0),
        ]);
        assert_ne!(a.layout_description(), b.layout_description());
        assert_eq!(
            a.layout_description(),
            "row@(-)[300x40]{unknown@(4,0)[100x16]}"
        );
    }

    #[test]
    fn test_snapshot_deserializes_with_defaults() {
        let json = r#"{"rows":[{"role":"row","size":{"width":300,"height":20},
            "children":[{"role":"group","children":[
              {"role":"unknown","size":{"width":90,"height":15},"value":"Bob to Everyone"},
              {"role":"scroll_bar"}]}]}]}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.rows.len(), 1);
        let cells = &snapshot.rows[0].children[0].children;
        assert_eq!(cells[0].value.as_deref(), Some("Bob to Everyone"));
        assert_eq!(cells[1].role, Role::Other);
        assert!(cells[1].position.is_none());
    }
}
