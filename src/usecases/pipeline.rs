//! Wires scanner, publish worker and event bus into one unit.
//!
//! Front ends subscribe before `start()`; the stream replays nothing.

use crate::ports::{ChatSink, EventStream, SnapshotProvider};
use crate::usecases::classifier::LayoutHeuristics;
use crate::usecases::event_bus::EventBus;
use crate::usecases::publish_service::{PublishService, PublishWorker, RetryPolicy};
use crate::usecases::scan_service::{PollCadence, ScanService};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

pub struct Pipeline {
    provider: Arc<dyn SnapshotProvider>,
    sink: Arc<dyn ChatSink>,
    cadence: PollCadence,
    retry: RetryPolicy,
    layout: LayoutHeuristics,
    bus: EventBus,
}

impl Pipeline {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        sink: Arc<dyn ChatSink>,
        cadence: PollCadence,
        retry: RetryPolicy,
        layout: LayoutHeuristics,
    ) -> Self {
        Self {
            provider,
            sink,
            cadence,
            retry,
            layout,
            bus: EventBus::new(),
        }
    }

    /// A new, independent copy of the output stream.
    pub fn subscribe(&self) -> EventStream {
        self.bus.subscribe()
    }

    /// Spawn the scanner and the publish worker.
    pub fn start(self) -> PipelineHandle {
        let (publish_tx, publish_rx) = mpsc::unbounded_channel();

        let worker = PublishWorker::new(
            PublishService::new(self.sink, self.retry),
            publish_rx,
            self.bus.clone(),
        );
        let publish = tokio::spawn(worker.run());

        let scanner = ScanService::new(
            self.provider,
            self.layout,
            self.cadence,
            self.bus,
            publish_tx,
        );
        let scan = tokio::spawn(async move { scanner.run_loop().await });

        PipelineHandle { scan, publish }
    }
}

/// Running pipeline. Torn down as a unit.
pub struct PipelineHandle {
    scan: JoinHandle<()>,
    publish: JoinHandle<()>,
}

impl PipelineHandle {
    /// Resolves only if the scanner stops on its own, which should never happen.
    pub async fn stopped(&mut self) {
        match (&mut self.scan).await {
            Ok(()) => error!("scanner terminated (should not happen)"),
            Err(e) if e.is_cancelled() => {}
            Err(e) => error!(error = %e, "scanner panicked"),
        }
    }

    /// Abandon the scan loop and any in-flight publish.
    pub fn abort(&self) {
        self.scan.abort();
        self.publish.abort();
    }
}
