//! Snapshot providers. Implement SnapshotProvider.

pub mod json_file;
pub mod scripted;

pub use json_file::JsonFileSnapshotProvider;
pub use scripted::ScriptedSnapshotProvider;
