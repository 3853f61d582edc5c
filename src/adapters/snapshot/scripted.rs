//! In-memory SnapshotProvider replaying a scripted sequence.
//!
//! Host and meeting presence are switches; chat reads are served from a
//! queue, and the last snapshot served repeats once the queue drains.

use crate::domain::{DomainError, Snapshot};
use crate::ports::SnapshotProvider;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct ScriptedSnapshotProvider {
    host_running: AtomicBool,
    meeting_window: AtomicBool,
    snapshots: Mutex<Script>,
    fetches: AtomicUsize,
}

#[derive(Default)]
struct Script {
    queued: VecDeque<Result<Option<Snapshot>, DomainError>>,
    last: Option<Snapshot>,
}

impl ScriptedSnapshotProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_running(self, running: bool) -> Self {
        self.set_host_running(running);
        self
    }

    pub fn with_meeting_window(self, present: bool) -> Self {
        self.set_meeting_window(present);
        self
    }

    pub fn set_host_running(&self, running: bool) {
        self.host_running.store(running, Ordering::SeqCst);
    }

    pub fn set_meeting_window(&self, present: bool) {
        self.meeting_window.store(present, Ordering::SeqCst);
    }

    /// Queue the next chat read. `None` is a closed chat.
    pub fn push_snapshot(&self, snapshot: Option<Snapshot>) {
        self.script().queued.push_back(Ok(snapshot));
    }

    /// Queue a failed chat read. It is served once and never repeats.
    pub fn push_read_error(&self, message: impl Into<String>) {
        self.script()
            .queued
            .push_back(Err(DomainError::Snapshot(message.into())));
    }

    /// Number of chat reads served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for ScriptedSnapshotProvider {
    async fn is_host_running(&self) -> Result<bool, DomainError> {
        Ok(self.host_running.load(Ordering::SeqCst))
    }

    async fn find_meeting_surface(&self) -> Result<bool, DomainError> {
        Ok(self.host_running.load(Ordering::SeqCst) && self.meeting_window.load(Ordering::SeqCst))
    }

    async fn fetch_chat_snapshot(&self) -> Result<Option<Snapshot>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script();
        match script.queued.pop_front() {
            Some(Ok(next)) => script.last = next,
            Some(Err(e)) => return Err(e),
            None => {}
        }
        Ok(script.last.clone())
    }
}
