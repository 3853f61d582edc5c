//! Front-end state as a fold over the pipeline output.
//!
//! Every front end owns its own `Dashboard`; nothing here is shared.

use crate::domain::{
    ApplicationStatus, MeetingStatus, PipelineEvent, PublishAttempt, PublishError, PublishEvent,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

/// Number of recent attempts kept for display.
pub const HISTORY_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub start_time: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub recent_attempts: VecDeque<PublishAttempt>,
    pub success_count: u64,
    pub failure_count: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            start_time: Utc::now(),
            status: ApplicationStatus::NotRunning,
            recent_attempts: VecDeque::with_capacity(HISTORY_CAPACITY),
            success_count: 0,
            failure_count: 0,
        }
    }

    /// Apply one pipeline event.
    pub fn apply(&mut self, event: &PipelineEvent) {
        match event {
            Ok(PublishEvent::Publish(attempt)) => {
                self.status = chat_open(true);
                if self.recent_attempts.len() == HISTORY_CAPACITY {
                    self.recent_attempts.pop_front();
                }
                self.recent_attempts.push_back(attempt.clone());
                if attempt.is_success() {
                    self.success_count += 1;
                } else {
                    self.failure_count += 1;
                }
            }
            Ok(PublishEvent::NoOp) => {
                self.status = chat_open(true);
            }
            Err(PublishError::ZoomNotRunning) => {
                self.status = ApplicationStatus::NotRunning;
                self.recent_attempts.clear();
            }
            Err(PublishError::NoMeetingInProgress) => {
                self.status = ApplicationStatus::Running(MeetingStatus::NotInProgress);
                self.recent_attempts.clear();
            }
            // Attempts made before the chat closed stay visible.
            Err(PublishError::ChatNotOpen) => {
                self.status = chat_open(false);
            }
        }
    }

    pub fn total_count(&self) -> u64 {
        self.success_count + self.failure_count
    }

    pub fn uptime(&self) -> Duration {
        Utc::now() - self.start_time
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

fn chat_open(open: bool) -> ApplicationStatus {
    ApplicationStatus::Running(MeetingStatus::InProgress { chat_open: open })
}
