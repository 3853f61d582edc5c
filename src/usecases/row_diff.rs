//! Finds the chat rows appended since the last stable snapshot.

use crate::domain::{Element, Snapshot};

/// Counts rows already processed for the current chat surface.
#[derive(Debug, Default)]
pub struct RowDiff {
    processed: usize,
}

impl RowDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Rows beyond the processed count. A closed chat resets the count so a
    /// reopened surface is read from the start.
    ///
    /// Zoom redraws re-laid-out rows with their first cell at x = 0; everything
    /// collected before such a row in the same slice is a stale duplicate.
    pub fn new_rows(&mut self, snapshot: Option<Snapshot>) -> Vec<Element> {
        let Some(snapshot) = snapshot else {
            self.processed = 0;
            return Vec::new();
        };

        let total = snapshot.rows.len();
        let fresh = snapshot
            .rows
            .into_iter()
            .skip(self.processed)
            .fold(Vec::new(), |mut acc, row| {
                if starts_reflow(&row) {
                    acc.clear();
                }
                acc.push(row);
                acc
            });
        self.processed = total;
        fresh
    }
}

fn starts_reflow(row: &Element) -> bool {
    row.children
        .first()
        .and_then(|first| first.position)
        .is_some_and(|p| p.x == 0.0)
}
