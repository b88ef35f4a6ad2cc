//! JSON file ledger implementation.
//!
//! Markers are held in memory and flushed to a single JSON file after every
//! record, written atomically (temp file + rename) so an interrupted write
//! cannot corrupt the ledger.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::VoteKind;
use crate::storage::{LedgerEntry, VoteLedger};

/// File-backed vote ledger.
pub struct JsonVoteLedger {
    path: PathBuf,
    entries: Mutex<HashMap<String, LedgerEntry>>,
}

impl JsonVoteLedger {
    /// Open (or create) a ledger at the given path.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(AppError::Io(e)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Write the full marker map atomically.
    async fn flush(&self, snapshot: &HashMap<String, LedgerEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl VoteLedger for JsonVoteLedger {
    async fn get(&self, mosque_id: &str) -> Result<Option<VoteKind>> {
        let entries = self.entries.lock().expect("ledger lock poisoned");
        Ok(entries.get(mosque_id).map(|e| e.vote_type))
    }

    async fn record(&self, mosque_id: &str, vote_type: VoteKind) -> Result<()> {
        let snapshot = {
            let mut entries = self.entries.lock().expect("ledger lock poisoned");
            entries.insert(mosque_id.to_string(), LedgerEntry::new(vote_type));
            entries.clone()
        };
        self.flush(&snapshot).await
    }

    async fn count(&self) -> Result<usize> {
        let entries = self.entries.lock().expect("ledger lock poisoned");
        Ok(entries.len())
    }
}
