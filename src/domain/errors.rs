//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Snapshot provider error: {0}")]
    Snapshot(String),

    /// Request never produced a response (connect, timeout, reset). Retried.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Destination cannot be turned into a request URL. Messages are dropped.
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("View error: {0}")]
    View(String),
}
