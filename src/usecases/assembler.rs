//! Turns the classified cell stream into chat messages.

use crate::domain::ChatMessage;
use crate::usecases::classifier::ChatCell;

/// Route used for text seen before any route label.
pub const UNKNOWN_ROUTE: &str = "Unknown to Unknown";

/// Reducer carrying the last route label seen.
#[derive(Debug)]
pub struct MessageAssembler {
    current_route: String,
}

impl MessageAssembler {
    pub fn new() -> Self {
        Self {
            current_route: UNKNOWN_ROUTE.to_string(),
        }
    }

    pub fn current_route(&self) -> &str {
        &self.current_route
    }

    /// A route replaces the current one; text becomes a message under it.
    pub fn push(&mut self, cell: ChatCell) -> Option<ChatMessage> {
        match cell {
            ChatCell::Route(route) => {
                self.current_route = route;
                None
            }
            ChatCell::Text(text) => Some(ChatMessage::new(self.current_route.clone(), text)),
        }
    }

    /// Feed cells in order, collecting the messages they complete.
    pub fn assemble(&mut self, cells: impl IntoIterator<Item = ChatCell>) -> Vec<ChatMessage> {
        cells.into_iter().filter_map(|cell| self.push(cell)).collect()
    }
}

impl Default for MessageAssembler {
    fn default() -> Self {
        Self::new()
    }
}
