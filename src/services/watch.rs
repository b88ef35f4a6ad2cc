// src/services/watch.rs

//! Change notification by polling.
//!
//! The backend has no push channel we can hold open from a CLI process, so
//! changes are detected by polling the exact row counts of both tables and
//! comparing against the last observed fingerprint. Subscribers receive an
//! opaque [`ChangeEvent`]; the only sensible reaction is to re-run the full
//! pipeline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::services::{Backend, TableCounts};

/// Opaque notification that the backend's tables changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent;

/// Polls table counts and emits a [`ChangeEvent`] whenever they move.
pub struct PollingWatcher {
    backend: Arc<dyn Backend>,
    interval: Duration,
    last: Option<TableCounts>,
}

impl PollingWatcher {
    /// Create a watcher polling at the given interval.
    pub fn new(backend: Arc<dyn Backend>, interval: Duration) -> Self {
        Self {
            backend,
            interval,
            last: None,
        }
    }

    /// Run one poll. Returns true if the fingerprint moved since the last
    /// successful poll. The first poll only establishes the baseline.
    pub async fn poll_once(&mut self) -> Result<bool> {
        let counts = self.backend.table_counts().await?;
        let changed = self.last.is_some_and(|previous| previous != counts);
        self.last = Some(counts);
        Ok(changed)
    }

    /// Spawn the polling loop, returning the event receiver.
    ///
    /// Poll failures are logged and skipped; the previous fingerprint is
    /// kept. The loop ends when the receiver is dropped.
    pub fn spawn(mut self) -> mpsc::Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(self.interval).await;
                match self.poll_once().await {
                    Ok(true) => {
                        if tx.send(ChangeEvent).await.is_err() {
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => log::warn!("Change poll failed: {e}"),
                }
            }
        });

        rx
    }
}
