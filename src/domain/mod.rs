//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the snapshot model and the front-end fold live here.

pub mod entities;
pub mod errors;
pub mod model;
pub mod snapshot;

pub use entities::{
    ApplicationStatus, ChatMessage, MeetingStatus, NO_CONTENT, PipelineEvent, PublishAttempt,
    PublishError, PublishEvent, ResponseSummary,
};
pub use errors::DomainError;
pub use model::{Dashboard, HISTORY_CAPACITY};
pub use snapshot::{Element, Point, Role, Size, Snapshot};
