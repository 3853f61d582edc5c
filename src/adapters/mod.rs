//! Infrastructure adapters. Implement ports.
//!
//! Snapshot sources, HTTP sinks, front ends. Map errors to DomainError.

pub mod http;
pub mod snapshot;
pub mod ui;
