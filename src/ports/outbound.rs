//! Outbound ports. The pipeline calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ChatMessage, DomainError, ResponseSummary, Snapshot};

/// Read access to the host application's UI. Every call is a fresh read.
#[async_trait::async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Whether the host application process exists.
    async fn is_host_running(&self) -> Result<bool, DomainError>;

    /// Whether any meeting window is present: the meeting window itself,
    /// a detached chat window, or a screen share window.
    async fn find_meeting_surface(&self) -> Result<bool, DomainError>;

    /// Current chat table, or `None` when no chat surface is open.
    /// The table may be mid-update; callers stabilize before trusting it.
    async fn fetch_chat_snapshot(&self) -> Result<Option<Snapshot>, DomainError>;
}

/// Destination for reconstructed chat messages.
#[async_trait::async_trait]
pub trait ChatSink: Send + Sync {
    /// Deliver one message, once. Any HTTP status is `Ok`.
    ///
    /// # Errors
    /// `DomainError::Transport` when no response was received (retryable),
    /// `DomainError::InvalidDestination` when no request could be built.
    async fn deliver(&self, message: &ChatMessage) -> Result<ResponseSummary, DomainError>;
}
