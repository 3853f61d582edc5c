//! Sink used when no destination is configured.
//!
//! Logs each message and answers 204 without touching the network.

use crate::domain::{ChatMessage, DomainError, NO_CONTENT, ResponseSummary};
use crate::ports::ChatSink;
use tracing::info;

#[derive(Debug, Default)]
pub struct DryRunSink;

impl DryRunSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ChatSink for DryRunSink {
    async fn deliver(&self, message: &ChatMessage) -> Result<ResponseSummary, DomainError> {
        info!(route = %message.route, text = %message.text, "[DRY RUN] would publish");
        Ok(ResponseSummary::new(NO_CONTENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_always_succeeds() {
        let summary = DryRunSink::new()
            .deliver(&ChatMessage::new("Me to Everyone", "testing"))
            .await
            .unwrap();
        assert!(summary.is_success());
    }
}
