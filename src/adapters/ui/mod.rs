//! Front ends. Implement EventView; each folds its own Dashboard.

pub mod console;
pub mod journal;

pub use console::ConsoleView;
pub use journal::JournalView;
