//! Waits for the chat table to stop changing before it is read.
//!
//! Zoom re-lays-out rows while they are being read. A snapshot is trusted only
//! once two back-to-back samples describe the same layout.

use crate::domain::{DomainError, Snapshot};
use crate::ports::SnapshotProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{trace, warn};

/// Failed reads in a row before a sampling run is abandoned.
pub const MAX_CONSECUTIVE_READ_FAILURES: usize = 5;

pub struct Stabilizer {
    provider: Arc<dyn SnapshotProvider>,
    /// Delay between consecutive samples.
    interval: Duration,
}

impl Stabilizer {
    pub fn new(provider: Arc<dyn SnapshotProvider>, interval: Duration) -> Self {
        Self { provider, interval }
    }

    /// Sample until two consecutive layout descriptions match and return the
    /// later sample. An absent chat surface is stable immediately.
    ///
    /// A failed read (e.g. a half-written snapshot) breaks the comparison and
    /// sampling continues. After `MAX_CONSECUTIVE_READ_FAILURES` failures in a
    /// row the last error is returned.
    pub async fn stable_snapshot(&self) -> Result<Option<Snapshot>, DomainError> {
        let mut previous: Option<String> = None;
        let mut samples = 0usize;
        let mut failures = 0usize;

        loop {
            samples += 1;
            let snapshot = match self.provider.fetch_chat_snapshot().await {
                Ok(Some(snapshot)) => snapshot,
                Ok(None) => return Ok(None),
                Err(e) => {
                    failures += 1;
                    if failures >= MAX_CONSECUTIVE_READ_FAILURES {
                        return Err(e);
                    }
                    warn!(error = %e, failures, "chat snapshot read failed; sampling again");
                    previous = None;
                    tokio::time::sleep(self.interval).await;
                    continue;
                }
            };
            failures = 0;

            let description = snapshot.layout_description();
            if previous.as_deref() == Some(description.as_str()) {
                trace!(samples, rows = snapshot.rows.len(), "chat table stable");
                return Ok(Some(snapshot));
            }
            previous = Some(description);
            tokio::time::sleep(self.interval).await;
        }
    }
}
