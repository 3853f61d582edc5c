//! Inbound port. Front ends subscribe to the pipeline output.

use crate::domain::{DomainError, PipelineEvent};
use tokio::sync::mpsc;

/// One subscriber's copy of the ordered event stream.
pub type EventStream = mpsc::UnboundedReceiver<PipelineEvent>;

/// A front end. Folds the stream into its own state and renders it.
#[async_trait::async_trait]
pub trait EventView: Send + Sync {
    /// Consume events until the stream ends. The stream ending at all is an anomaly.
    async fn render(&self, events: EventStream) -> Result<(), DomainError>;
}
