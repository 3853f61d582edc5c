//! Test doubles shared by unit tests.

use crate::domain::{ChatMessage, DomainError, ResponseSummary};
use crate::ports::ChatSink;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Sink answering from a queue of outcomes; 204 once the queue is empty.
pub struct ScriptedSink {
    outcomes: Mutex<VecDeque<Result<ResponseSummary, DomainError>>>,
    delivered: Mutex<Vec<ChatMessage>>,
}

impl ScriptedSink {
    pub fn with_outcomes(outcomes: Vec<Result<ResponseSummary, DomainError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Every delivery attempt, retries included.
    pub fn delivered(&self) -> Vec<ChatMessage> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ChatSink for ScriptedSink {
    async fn deliver(&self, message: &ChatMessage) -> Result<ResponseSummary, DomainError> {
        self.delivered.lock().unwrap().push(message.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ResponseSummary::new(204)))
    }
}
