//! Delivers chat messages to the destination with bounded retry.
//!
//! The worker consumes messages from an mpsc channel in order, so the scan
//! loop never waits on the network.

use crate::domain::{ChatMessage, DomainError, PublishAttempt, PublishEvent};
use crate::ports::ChatSink;
use crate::usecases::event_bus::EventBus;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first transport failure.
    pub max_retries: u32,
    /// Fixed wait between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(2),
        }
    }
}

pub struct PublishService {
    sink: Arc<dyn ChatSink>,
    retry: RetryPolicy,
}

impl PublishService {
    pub fn new(sink: Arc<dyn ChatSink>, retry: RetryPolicy) -> Self {
        Self { sink, retry }
    }

    /// Publish one message. Returns `None` when the message was dropped
    /// because no request could be built for the destination.
    pub async fn publish(&self, message: ChatMessage) -> Option<PublishAttempt> {
        let mut retries = 0u32;
        loop {
            match self.sink.deliver(&message).await {
                Ok(summary) => {
                    debug!(route = %message.route, status = summary.status, "message published");
                    return Some(PublishAttempt {
                        chat_message: message,
                        result: Ok(summary),
                    });
                }
                Err(DomainError::InvalidDestination(reason)) => {
                    warn!(reason = %reason, route = %message.route, "invalid destination, dropping message");
                    return None;
                }
                Err(e) if retries < self.retry.max_retries => {
                    retries += 1;
                    warn!(
                        error = %e,
                        attempt = retries,
                        max_retries = self.retry.max_retries,
                        "publish failed; retrying"
                    );
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => {
                    warn!(error = %e, route = %message.route, "publish failed; retries exhausted");
                    return Some(PublishAttempt {
                        chat_message: message,
                        result: Err(e),
                    });
                }
            }
        }
    }
}

/// Publish worker. Reports one `Publish` event per completed attempt.
pub struct PublishWorker {
    service: PublishService,
    rx: mpsc::UnboundedReceiver<ChatMessage>,
    bus: EventBus,
}

impl PublishWorker {
    pub fn new(
        service: PublishService,
        rx: mpsc::UnboundedReceiver<ChatMessage>,
        bus: EventBus,
    ) -> Self {
        Self { service, rx, bus }
    }

    /// Run the worker. Processes until the channel is closed.
    pub async fn run(mut self) {
        while let Some(message) = self.rx.recv().await {
            if let Some(attempt) = self.service.publish(message).await {
                self.bus.publish(Ok(PublishEvent::Publish(attempt)));
            }
        }

        info!("publish worker finished (channel closed)");
    }
}
