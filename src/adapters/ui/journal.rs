//! Front end that records the event stream in the log.
//!
//! Status changes and publish attempts are logged; repeated status events
//! (one per scan cycle) are not.

use crate::domain::{Dashboard, DomainError, PublishEvent};
use crate::ports::{EventStream, EventView};
use async_trait::async_trait;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
pub struct JournalView;

impl JournalView {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventView for JournalView {
    async fn render(&self, mut events: EventStream) -> Result<(), DomainError> {
        let mut board = Dashboard::new();

        while let Some(event) = events.recv().await {
            let previous = board.status;
            board.apply(&event);
            if board.status != previous {
                info!(status = ?board.status, "zoom status changed");
            }

            if let Ok(PublishEvent::Publish(attempt)) = &event {
                match &attempt.result {
                    Ok(summary) if summary.is_success() => info!(
                        route = %attempt.chat_message.route,
                        status = summary.status,
                        published = board.success_count,
                        total = board.total_count(),
                        "chat message published"
                    ),
                    Ok(summary) => warn!(
                        route = %attempt.chat_message.route,
                        status = summary.status,
                        "destination rejected chat message"
                    ),
                    Err(e) => warn!(
                        route = %attempt.chat_message.route,
                        error = %e,
                        "chat message not delivered"
                    ),
                }
            }
        }

        error!("event stream terminated unexpectedly (journal view)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PublishError;
    use crate::usecases::EventBus;

    #[tokio::test]
    async fn test_returns_when_stream_ends() {
        let bus = EventBus::new();
        let events = bus.subscribe();
        bus.publish(Err(PublishError::ZoomNotRunning));
        bus.publish(Ok(PublishEvent::NoOp));
        drop(bus);

        assert!(JournalView::new().render(events).await.is_ok());
    }
}
