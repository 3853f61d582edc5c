//! Tracks the host application's state and scans the chat while a meeting runs.
//!
//! One coarse ticker checks whether Zoom and a meeting are present. Once a
//! meeting is found, a medium ticker runs scan cycles (stabilize, diff,
//! classify, assemble, dispatch) until the meeting window goes away. Cycles
//! run inside this single task, and missed ticks are skipped, so two cycles
//! never read the chat surface at the same time.

use crate::domain::{ChatMessage, PublishError, PublishEvent, Snapshot};
use crate::ports::SnapshotProvider;
use crate::usecases::assembler::MessageAssembler;
use crate::usecases::classifier::{ChatCell, LayoutHeuristics};
use crate::usecases::event_bus::EventBus;
use crate::usecases::row_diff::RowDiff;
use crate::usecases::stabilizer::Stabilizer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCadence {
    /// Host/meeting detection while idle.
    pub poll_interval: Duration,
    /// Scan cycles while a meeting is present.
    pub scan_interval: Duration,
    /// Sampling while waiting for the chat table to settle.
    pub stabilize_interval: Duration,
}

impl Default for PollCadence {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            scan_interval: Duration::from_millis(500),
            stabilize_interval: Duration::from_millis(2),
        }
    }
}

/// Per-meeting state: rows seen so far and the current route.
/// Starts empty each time a meeting is detected.
#[derive(Debug)]
pub struct ScanSession {
    layout: LayoutHeuristics,
    rows: RowDiff,
    assembler: MessageAssembler,
}

impl ScanSession {
    pub fn new(layout: LayoutHeuristics) -> Self {
        Self {
            layout,
            rows: RowDiff::new(),
            assembler: MessageAssembler::new(),
        }
    }

    /// Messages completed by the rows this snapshot adds, in display order.
    pub fn process(&mut self, snapshot: Option<Snapshot>) -> Vec<ChatMessage> {
        let rows = self.rows.new_rows(snapshot);
        let cells: Vec<ChatCell> = rows
            .iter()
            .flat_map(|row| self.layout.classify_row(row))
            .collect();
        self.assembler.assemble(cells)
    }
}

pub struct ScanService {
    provider: Arc<dyn SnapshotProvider>,
    stabilizer: Stabilizer,
    layout: LayoutHeuristics,
    cadence: PollCadence,
    bus: EventBus,
    publish_tx: mpsc::UnboundedSender<ChatMessage>,
}

impl ScanService {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        layout: LayoutHeuristics,
        cadence: PollCadence,
        bus: EventBus,
        publish_tx: mpsc::UnboundedSender<ChatMessage>,
    ) -> Self {
        Self {
            stabilizer: Stabilizer::new(Arc::clone(&provider), cadence.stabilize_interval),
            provider,
            layout,
            cadence,
            bus,
            publish_tx,
        }
    }

    /// Poll forever. Call from a spawned task; stop it by aborting the task.
    pub async fn run_loop(&self) {
        info!(
            poll_ms = self.cadence.poll_interval.as_millis() as u64,
            scan_ms = self.cadence.scan_interval.as_millis() as u64,
            "scanner started"
        );
        let mut ticker = interval(self.cadence.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match self.detect().await {
                Ok(()) => self.scan_meeting().await,
                Err(error) => self.bus.publish(Err(error)),
            }
        }
    }

    /// `Ok` when Zoom is running with a meeting window present.
    pub async fn detect(&self) -> Result<(), PublishError> {
        let running = self.provider.is_host_running().await.unwrap_or_else(|e| {
            warn!(error = %e, "host detection failed; assuming Zoom is not running");
            false
        });
        if !running {
            return Err(PublishError::ZoomNotRunning);
        }
        if !self.meeting_window_present().await {
            return Err(PublishError::NoMeetingInProgress);
        }
        Ok(())
    }

    /// Scan cycles until the meeting window disappears.
    async fn scan_meeting(&self) {
        info!("meeting detected; scanning chat");
        let mut session = ScanSession::new(self.layout);
        let mut ticker = interval(self.cadence.scan_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if !self.meeting_window_present().await {
                info!("meeting window gone; back to idle polling");
                return;
            }
            self.scan_cycle(&mut session).await;
        }
    }

    async fn scan_cycle(&self, session: &mut ScanSession) {
        let snapshot = match self.stabilizer.stable_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Row counter and route stay as they were.
                warn!(error = %e, "chat unreadable; skipping scan cycle");
                return;
            }
        };
        self.bus.publish(match snapshot {
            Some(_) => Ok(PublishEvent::NoOp),
            None => Err(PublishError::ChatNotOpen),
        });

        let messages = session.process(snapshot);
        if !messages.is_empty() {
            debug!(count = messages.len(), "new chat messages");
        }
        for message in messages {
            if self.publish_tx.send(message).is_err() {
                warn!("publish channel closed, dropping message");
            }
        }
    }

    async fn meeting_window_present(&self) -> bool {
        match self.provider.find_meeting_surface().await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "meeting detection failed; assuming no meeting");
                false
            }
        }
    }
}
