// src/app.rs

//! Application controller.
//!
//! Owns the in-memory entry state and updates it exclusively through the
//! merge → tally → rank pipeline. Voting and submission flow through here so
//! the one-vote guard and the degraded (seed-only) mode live in one place.

use std::sync::Arc;

use futures::future;

use crate::error::{AppError, Result};
use crate::models::{Mosque, NewMosque, NewVote, Seed, VoteKind};
use crate::pipeline::Snapshot;
use crate::services::Backend;
use crate::storage::VoteLedger;

/// Result of a vote attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Vote stored on the backend and marked in the ledger
    Recorded,
    /// This client already voted for the entry; nothing was sent
    AlreadyVoted(VoteKind),
    /// No backend configured; voting is a no-op
    Disabled,
}

/// Top-level controller holding the current snapshot.
pub struct App {
    seed: Vec<Mosque>,
    backend: Option<Arc<dyn Backend>>,
    ledger: Arc<dyn VoteLedger>,
    snapshot: Snapshot,
}

impl App {
    /// Create a controller. `backend` is `None` in seed-only mode.
    pub fn new(seed: Seed, backend: Option<Arc<dyn Backend>>, ledger: Arc<dyn VoteLedger>) -> Self {
        let snapshot = Snapshot::build(&seed.mosques, Vec::new(), &[]);
        Self {
            seed: seed.mosques,
            backend,
            ledger,
            snapshot,
        }
    }

    /// Whether the tracker is running without a backend.
    pub fn is_degraded(&self) -> bool {
        self.backend.is_none()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Re-run the full pipeline from a fresh fetch of both tables.
    ///
    /// On fetch failure the previous snapshot is kept and the error only
    /// logged; the caller sees stale-but-consistent data.
    pub async fn refresh(&mut self) -> Result<()> {
        let Some(backend) = self.backend.clone() else {
            self.snapshot = Snapshot::build(&self.seed, Vec::new(), &[]);
            return Ok(());
        };

        match future::try_join(backend.fetch_mosques(), backend.fetch_votes()).await {
            Ok((fetched, votes)) => {
                self.snapshot = Snapshot::build(&self.seed, fetched, &votes);
            }
            Err(e) => {
                log::warn!("Fetch failed, keeping previous snapshot: {e}");
            }
        }
        Ok(())
    }

    /// Filter and rank the current snapshot for display.
    pub fn search(&self, term: &str) -> Vec<Mosque> {
        self.snapshot.search(term)
    }

    /// Cast a credibility vote for an entry.
    ///
    /// The ledger is checked before anything is sent: a second attempt for
    /// the same entry issues no network call at all.
    pub async fn cast_vote(&mut self, mosque_id: &str, kind: VoteKind) -> Result<VoteOutcome> {
        if self.snapshot.get(mosque_id).is_none() {
            return Err(AppError::validation(format!(
                "No entry with id '{mosque_id}'"
            )));
        }

        if let Some(previous) = self.ledger.get(mosque_id).await? {
            return Ok(VoteOutcome::AlreadyVoted(previous));
        }

        let Some(backend) = self.backend.clone() else {
            log::warn!("No backend configured; vote for entry {mosque_id} not recorded");
            return Ok(VoteOutcome::Disabled);
        };

        let payload = NewVote {
            mosque_id: mosque_id.to_string(),
            vote_type: kind,
        };
        if let Err(e) = backend.insert_vote(&payload).await {
            log::error!("Vote submission failed for entry {mosque_id}: {e}");
            // Resync so any optimistic local state is discarded.
            self.refresh().await?;
            return Err(e);
        }

        self.ledger.record(mosque_id, kind).await?;
        self.bump_count(mosque_id, kind);
        Ok(VoteOutcome::Recorded)
    }

    /// Submit a new entry. Returns the backend-assigned row, or `None` in
    /// seed-only mode.
    pub async fn submit(&mut self, mosque: NewMosque) -> Result<Option<Mosque>> {
        if mosque.name.trim().is_empty() || mosque.location.trim().is_empty() {
            return Err(AppError::validation("name and location are required"));
        }

        let Some(backend) = self.backend.clone() else {
            log::warn!("No backend configured; submission '{}' not recorded", mosque.name);
            return Ok(None);
        };

        let created = backend.insert_mosque(&mosque).await?;
        self.refresh().await?;
        Ok(Some(created))
    }

    /// Optimistic local increment; the next refresh recomputes every counter
    /// from the vote table.
    fn bump_count(&mut self, mosque_id: &str, kind: VoteKind) {
        if let Some(entry) = self.snapshot.mosques.iter_mut().find(|m| m.id == mosque_id) {
            match kind {
                VoteKind::True => entry.true_count += 1,
                VoteKind::Fake => entry.fake_count += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::Vote;
    use crate::services::TableCounts;
    use crate::storage::MemoryLedger;

    /// Backend fake that records writes and serves configurable rows.
    #[derive(Default)]
    struct RecordingBackend {
        mosques: Mutex<Vec<Mosque>>,
        votes: Mutex<Vec<Vote>>,
        insert_vote_calls: AtomicUsize,
        fail_reads: AtomicBool,
    }

    #[async_trait]
    impl Backend for RecordingBackend {
        async fn fetch_mosques(&self) -> Result<Vec<Mosque>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(AppError::backend("mosques", "simulated outage"));
            }
            Ok(self.mosques.lock().unwrap().clone())
        }

        async fn fetch_votes(&self) -> Result<Vec<Vote>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(AppError::backend("votes", "simulated outage"));
            }
            Ok(self.votes.lock().unwrap().clone())
        }

        async fn insert_vote(&self, vote: &NewVote) -> Result<()> {
            self.insert_vote_calls.fetch_add(1, Ordering::SeqCst);
            self.votes.lock().unwrap().push(Vote {
                mosque_id: vote.mosque_id.clone(),
                vote_type: vote.vote_type.to_string(),
            });
            Ok(())
        }

        async fn insert_mosque(&self, mosque: &NewMosque) -> Result<Mosque> {
            let created = Mosque {
                id: "100".to_string(),
                name: mosque.name.clone(),
                location: mosque.location.clone(),
                has_biryani: mosque.has_biryani,
                menu_items: mosque.menu_items.clone(),
                latitude: mosque.latitude,
                longitude: mosque.longitude,
                true_count: 0,
                fake_count: 0,
            };
            self.mosques.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn table_counts(&self) -> Result<TableCounts> {
            Ok(TableCounts {
                mosques: self.mosques.lock().unwrap().len() as u64,
                votes: self.votes.lock().unwrap().len() as u64,
            })
        }
    }

    fn connected_app(backend: Arc<RecordingBackend>) -> App {
        App::new(
            Seed::default(),
            Some(backend as Arc<dyn Backend>),
            Arc::new(MemoryLedger::new()),
        )
    }

    #[tokio::test]
    async fn test_degraded_mode_serves_seed_at_zero() {
        let mut app = App::new(Seed::default(), None, Arc::new(MemoryLedger::new()));
        assert!(app.is_degraded());

        app.refresh().await.unwrap();
        let seed = Seed::default();
        assert_eq!(app.snapshot().mosques, seed.mosques);
        assert!(app.snapshot().mosques.iter().all(|m| m.net_score() == 0));
    }

    #[tokio::test]
    async fn test_degraded_mode_vote_and_submit_are_noops() {
        let ledger = Arc::new(MemoryLedger::new());
        let mut app = App::new(Seed::default(), None, ledger.clone());

        let outcome = app.cast_vote("1", VoteKind::True).await.unwrap();
        assert_eq!(outcome, VoteOutcome::Disabled);
        assert_eq!(ledger.count().await.unwrap(), 0);
        assert_eq!(app.snapshot().get("1").unwrap().true_count, 0);

        let submitted = app
            .submit(NewMosque {
                name: "নতুন মসজিদ".to_string(),
                location: "নতুন এলাকা".to_string(),
                has_biryani: false,
                menu_items: vec![],
                latitude: None,
                longitude: None,
            })
            .await
            .unwrap();
        assert!(submitted.is_none());
    }

    #[tokio::test]
    async fn test_second_vote_is_a_noop_without_network_call() {
        let backend = Arc::new(RecordingBackend::default());
        let mut app = connected_app(backend.clone());

        let first = app.cast_vote("1", VoteKind::True).await.unwrap();
        assert_eq!(first, VoteOutcome::Recorded);
        assert_eq!(backend.insert_vote_calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.snapshot().get("1").unwrap().true_count, 1);

        let second = app.cast_vote("1", VoteKind::Fake).await.unwrap();
        assert_eq!(second, VoteOutcome::AlreadyVoted(VoteKind::True));
        assert_eq!(backend.insert_vote_calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.snapshot().get("1").unwrap().true_count, 1);
        assert_eq!(app.snapshot().get("1").unwrap().fake_count, 0);
    }

    #[tokio::test]
    async fn test_vote_for_unknown_entry_is_rejected() {
        let backend = Arc::new(RecordingBackend::default());
        let mut app = connected_app(backend.clone());

        assert!(app.cast_vote("999", VoteKind::True).await.is_err());
        assert_eq!(backend.insert_vote_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_snapshot() {
        let backend = Arc::new(RecordingBackend::default());
        backend.votes.lock().unwrap().push(Vote {
            mosque_id: "2".to_string(),
            vote_type: "true".to_string(),
        });
        let mut app = connected_app(backend.clone());

        app.refresh().await.unwrap();
        assert_eq!(app.snapshot().get("2").unwrap().true_count, 1);

        backend.fail_reads.store(true, Ordering::SeqCst);
        app.refresh().await.unwrap();
        assert_eq!(app.snapshot().get("2").unwrap().true_count, 1);
    }

    #[tokio::test]
    async fn test_optimistic_count_confirmed_by_refresh() {
        let backend = Arc::new(RecordingBackend::default());
        let mut app = connected_app(backend.clone());

        app.cast_vote("3", VoteKind::Fake).await.unwrap();
        assert_eq!(app.snapshot().get("3").unwrap().fake_count, 1);

        // The fake backend stored the vote row, so a full recompute agrees.
        app.refresh().await.unwrap();
        assert_eq!(app.snapshot().get("3").unwrap().fake_count, 1);
    }

    #[tokio::test]
    async fn test_submit_inserts_and_refetches() {
        let backend = Arc::new(RecordingBackend::default());
        let mut app = connected_app(backend.clone());

        let created = app
            .submit(NewMosque {
                name: "রানীর বাজার মসজিদ".to_string(),
                location: "রানীর বাজার".to_string(),
                has_biryani: true,
                menu_items: vec!["খেজুর".to_string()],
                latitude: Some(23.47),
                longitude: Some(91.18),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.id, "100");
        // Refresh merged the server copy ahead of the seed remainder
        assert_eq!(app.snapshot().mosques[0].id, "100");
        assert_eq!(app.snapshot().count, 7);
    }

    #[tokio::test]
    async fn test_submit_requires_name_and_location() {
        let backend = Arc::new(RecordingBackend::default());
        let mut app = connected_app(backend);

        let result = app
            .submit(NewMosque {
                name: "  ".to_string(),
                location: "কোথাও".to_string(),
                has_biryani: false,
                menu_items: vec![],
                latitude: None,
                longitude: None,
            })
            .await;
        assert!(result.is_err());
    }
}
