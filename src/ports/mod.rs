//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: front ends consuming the pipeline output
//! - Outbound: called by the pipeline into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::{EventStream, EventView};
pub use outbound::{ChatSink, SnapshotProvider};
