//! Implements SnapshotProvider by reading a JSON document.
//!
//! An accessibility helper rewrites the document as Zoom's UI changes:
//!
//! ```json
//! { "host_running": true, "meeting_window": true, "chat": { "rows": [...] } }
//! ```
//!
//! `chat` is `null` while no chat surface is open. A missing file means Zoom
//! is not running.

use crate::domain::{DomainError, Snapshot};
use crate::ports::SnapshotProvider;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Default, Deserialize)]
struct SurfaceDocument {
    #[serde(default)]
    host_running: bool,
    #[serde(default)]
    meeting_window: bool,
    #[serde(default)]
    chat: Option<Snapshot>,
}

pub struct JsonFileSnapshotProvider {
    path: PathBuf,
}

impl JsonFileSnapshotProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Fresh read on every call; the document changes underneath us.
    async fn read(&self) -> Result<SurfaceDocument, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SurfaceDocument::default()),
            Err(e) => {
                return Err(DomainError::Snapshot(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        serde_json::from_str(&raw).map_err(|e| {
            DomainError::Snapshot(format!("parse {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for JsonFileSnapshotProvider {
    async fn is_host_running(&self) -> Result<bool, DomainError> {
        Ok(self.read().await?.host_running)
    }

    async fn find_meeting_surface(&self) -> Result<bool, DomainError> {
        let doc = self.read().await?;
        Ok(doc.host_running && (doc.meeting_window || doc.chat.is_some()))
    }

    async fn fetch_chat_snapshot(&self) -> Result<Option<Snapshot>, DomainError> {
        let doc = self.read().await?;
        Ok(if doc.host_running { doc.chat } else { None })
    }
}
