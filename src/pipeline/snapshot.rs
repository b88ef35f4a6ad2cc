// src/pipeline/snapshot.rs

//! Snapshot assembly: one full run of the fetch → merge → tally pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Mosque, Vote};
use crate::pipeline::{merge_entries, search_and_rank, tally};

/// The assembled entry collection after one full pipeline run.
///
/// There is no incremental update: every change notification rebuilds the
/// whole snapshot from a fresh fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// ISO 8601 timestamp of the run
    pub updated_at: DateTime<Utc>,
    /// Total entry count
    pub count: usize,
    /// The merged, counted entries
    pub mosques: Vec<Mosque>,
}

impl Snapshot {
    /// Build a snapshot from the seed list plus fetched rows and votes.
    pub fn build(seed: &[Mosque], fetched: Vec<Mosque>, votes: &[Vote]) -> Self {
        let mut mosques = merge_entries(fetched, seed.to_vec());
        let counts = tally::tally_votes(votes);
        tally::apply_tally(&mut mosques, &counts);

        Self {
            updated_at: Utc::now(),
            count: mosques.len(),
            mosques,
        }
    }

    /// Filter and rank the snapshot for display.
    pub fn search(&self, term: &str) -> Vec<Mosque> {
        search_and_rank(&self.mosques, term)
    }

    /// Look up an entry by identifier.
    pub fn get(&self, id: &str) -> Option<&Mosque> {
        self.mosques.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seed;

    fn vote(mosque_id: &str, tag: &str) -> Vote {
        Vote {
            mosque_id: mosque_id.to_string(),
            vote_type: tag.to_string(),
        }
    }

    #[test]
    fn test_build_without_backend_data_is_seed_at_zero() {
        let seed = Seed::default();
        let snapshot = Snapshot::build(&seed.mosques, vec![], &[]);

        assert_eq!(snapshot.count, seed.mosques.len());
        assert_eq!(snapshot.mosques, seed.mosques);
        assert!(snapshot.mosques.iter().all(|m| m.net_score() == 0));
    }

    #[test]
    fn test_build_attaches_counts_to_merged_entries() {
        let seed = Seed::default();
        let votes = vec![vote("1", "true"), vote("1", "true"), vote("1", "fake")];

        let snapshot = Snapshot::build(&seed.mosques, vec![], &votes);
        let entry = snapshot.get("1").unwrap();
        assert_eq!(entry.true_count, 2);
        assert_eq!(entry.fake_count, 1);
        assert_eq!(snapshot.get("2").unwrap().true_count, 0);
    }

    #[test]
    fn test_search_ranks_voted_entry_first() {
        let seed = Seed::default();
        let votes = vec![vote("3", "true"), vote("3", "true")];

        let snapshot = Snapshot::build(&seed.mosques, vec![], &votes);
        let ranked = snapshot.search("");
        assert_eq!(ranked[0].id, "3");
    }
}
