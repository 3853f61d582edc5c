//! Domain entities. Pure data structures for the core business.
//!
//! No accessibility/HTTP types here. Adapters map into these.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// HTTP status that counts as a successful publish.
pub const NO_CONTENT: u16 = 204;

/// A single reconstructed line of the meeting chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender and recipient, e.g. "Bob to Everyone".
    pub route: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(route: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.route, self.text)
    }
}

/// What the destination answered. Any status is a completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
}

impl ResponseSummary {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Only 204 counts towards the published total.
    pub fn is_success(&self) -> bool {
        self.status == NO_CONTENT
    }
}

/// A (possibly failed) attempt to publish a chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishAttempt {
    pub chat_message: ChatMessage,
    /// `Err` holds the last transport error once retries are exhausted.
    pub result: Result<ResponseSummary, DomainError>,
}

impl PublishAttempt {
    pub fn is_success(&self) -> bool {
        matches!(&self.result, Ok(summary) if summary.is_success())
    }
}

/// Progress reported by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishEvent {
    /// Chat observed open; nothing else to report.
    NoOp,
    Publish(PublishAttempt),
}

/// Environment-level unavailability. Expected and recoverable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    #[error("Zoom is not running")]
    ZoomNotRunning,

    #[error("no meeting in progress")]
    NoMeetingInProgress,

    #[error("meeting chat is not open")]
    ChatNotOpen,
}

/// One element of the pipeline output stream.
pub type PipelineEvent = Result<PublishEvent, PublishError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStatus {
    NotInProgress,
    InProgress { chat_open: bool },
}

/// Lifecycle of the host application as seen by front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationStatus {
    #[default]
    NotRunning,
    Running(MeetingStatus),
}

impl ApplicationStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, ApplicationStatus::Running(_))
    }

    /// `None` when the question does not apply (host not running).
    pub fn meeting_in_progress(&self) -> Option<bool> {
        match self {
            ApplicationStatus::NotRunning => None,
            ApplicationStatus::Running(MeetingStatus::NotInProgress) => Some(false),
            ApplicationStatus::Running(MeetingStatus::InProgress { .. }) => Some(true),
        }
    }

    /// `None` unless a meeting is in progress.
    pub fn chat_open(&self) -> Option<bool> {
        match self {
            ApplicationStatus::Running(MeetingStatus::InProgress { chat_open }) => {
                Some(*chat_open)
            }
            _ => None,
        }
    }
}
