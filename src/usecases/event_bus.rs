//! Fan-out of the ordered pipeline output to independent front ends.

use crate::domain::PipelineEvent;
use crate::ports::EventStream;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::debug;

/// Cloneable publishing handle. Every producer sends through it; each
/// subscriber gets its own unbounded copy of the stream from the point it
/// subscribed (nothing is replayed).
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<PipelineEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(tx);
        rx
    }

    /// Deliver to every live subscriber, dropping the ones that hung up.
    pub fn publish(&self, event: PipelineEvent) {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        if subscribers.len() < before {
            debug!(
                remaining = subscribers.len(),
                "dropped closed event subscribers"
            );
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<mpsc::UnboundedSender<PipelineEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PublishError, PublishEvent};

    #[tokio::test]
    async fn test_each_subscriber_gets_every_event_in_order() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(Err(PublishError::ZoomNotRunning));
        bus.publish(Ok(PublishEvent::NoOp));

        for rx in [&mut a, &mut b] {
            assert_eq!(rx.recv().await.unwrap(), Err(PublishError::ZoomNotRunning));
            assert_eq!(rx.recv().await.unwrap(), Ok(PublishEvent::NoOp));
        }
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_no_replay() {
        let bus = EventBus::new();
        bus.publish(Err(PublishError::ChatNotOpen));
        let mut late = bus.subscribe();
        bus.publish(Ok(PublishEvent::NoOp));
        assert_eq!(late.recv().await.unwrap(), Ok(PublishEvent::NoOp));
        assert!(late.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_subscribers_are_pruned() {
        let bus = EventBus::new();
        let dropped = bus.subscribe();
        let mut kept = bus.subscribe();
        drop(dropped);

        bus.publish(Ok(PublishEvent::NoOp));
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.recv().await.unwrap(), Ok(PublishEvent::NoOp));
    }

    #[tokio::test]
    async fn test_stream_ends_when_bus_is_dropped() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        drop(bus);
        assert!(rx.recv().await.is_none());
    }
}
