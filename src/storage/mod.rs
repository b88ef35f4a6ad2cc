//! The local vote ledger: the advisory one-vote-per-client guard.
//!
//! A vote may be cast for an entry at most once per client, keyed by entry
//! identifier. The marker is advisory only: another machine, another
//! profile, or a wiped storage directory can vote again, and the backend
//! enforces nothing. The ledger is injected as a capability so tests can
//! fake it.

pub mod local;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::VoteKind;

// Re-export for convenience
pub use local::JsonVoteLedger;

/// One recorded vote marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The tag that was cast
    pub vote_type: VoteKind,
    /// When the vote was cast
    pub voted_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(vote_type: VoteKind) -> Self {
        Self {
            vote_type,
            voted_at: Utc::now(),
        }
    }
}

/// Trait for vote ledger backends.
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// The tag previously cast for an entry, if any.
    async fn get(&self, mosque_id: &str) -> Result<Option<VoteKind>>;

    /// Record a cast vote. Overwrites silently if a marker already exists;
    /// callers are expected to check `get` first.
    async fn record(&self, mosque_id: &str, vote_type: VoteKind) -> Result<()>;

    /// Number of recorded markers.
    async fn count(&self) -> Result<usize>;
}

/// In-memory ledger for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: Mutex<HashMap<String, LedgerEntry>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoteLedger for MemoryLedger {
    async fn get(&self, mosque_id: &str) -> Result<Option<VoteKind>> {
        let entries = self.entries.lock().expect("ledger lock poisoned");
        Ok(entries.get(mosque_id).map(|e| e.vote_type))
    }

    async fn record(&self, mosque_id: &str, vote_type: VoteKind) -> Result<()> {
        let mut entries = self.entries.lock().expect("ledger lock poisoned");
        entries.insert(mosque_id.to_string(), LedgerEntry::new(vote_type));
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let entries = self.entries.lock().expect("ledger lock poisoned");
        Ok(entries.len())
    }
}
