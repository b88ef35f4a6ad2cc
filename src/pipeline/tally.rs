// src/pipeline/tally.rs

//! Vote aggregation: reduce raw vote rows into per-entry counters.

use std::collections::HashMap;

use crate::models::{Mosque, Vote, VoteCounts, VoteKind};

/// Aggregate a flat list of vote rows into per-entry counters.
///
/// Entries with no votes are simply absent from the map. Unrecognized tags
/// are excluded from both counters; the vote table enforces no validation,
/// so miscounting them as "fake" would silently skew scores.
pub fn tally_votes(votes: &[Vote]) -> HashMap<String, VoteCounts> {
    let mut tally: HashMap<String, VoteCounts> = HashMap::new();

    for vote in votes {
        let Some(kind) = vote.kind() else {
            log::debug!(
                "Ignoring vote with unrecognized tag '{}' for entry {}",
                vote.vote_type,
                vote.mosque_id
            );
            continue;
        };

        let counts = tally.entry(vote.mosque_id.clone()).or_default();
        match kind {
            VoteKind::True => counts.true_count += 1,
            VoteKind::Fake => counts.fake_count += 1,
        }
    }

    tally
}

/// Join aggregated counters onto a merged entry list.
///
/// Both counters are overwritten on every entry: counts are a derived view
/// of the vote table, never carried forward from stored rows. Entries absent
/// from the tally get zero on both.
pub fn apply_tally(mosques: &mut [Mosque], tally: &HashMap<String, VoteCounts>) {
    for mosque in mosques {
        let counts = tally.get(&mosque.id).copied().unwrap_or_default();
        mosque.true_count = counts.true_count;
        mosque.fake_count = counts.fake_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(mosque_id: &str, tag: &str) -> Vote {
        Vote {
            mosque_id: mosque_id.to_string(),
            vote_type: tag.to_string(),
        }
    }

    #[test]
    fn test_counts_per_entry() {
        let votes = vec![
            vote("1", "true"),
            vote("1", "true"),
            vote("1", "fake"),
            vote("2", "fake"),
        ];

        let tally = tally_votes(&votes);
        assert_eq!(
            tally["1"],
            VoteCounts {
                true_count: 2,
                fake_count: 1
            }
        );
        assert_eq!(
            tally["2"],
            VoteCounts {
                true_count: 0,
                fake_count: 1
            }
        );
    }

    #[test]
    fn test_unrecognized_tags_are_ignored() {
        let votes = vec![vote("1", "true"), vote("1", "bogus"), vote("1", "")];

        let tally = tally_votes(&votes);
        assert_eq!(
            tally["1"],
            VoteCounts {
                true_count: 1,
                fake_count: 0
            }
        );
    }

    #[test]
    fn test_unvoted_entries_absent_from_map() {
        let tally = tally_votes(&[vote("1", "true")]);
        assert!(!tally.contains_key("2"));
    }

    #[test]
    fn test_apply_tally_defaults_missing_to_zero() {
        let mut mosques = vec![
            Mosque {
                id: "1".to_string(),
                name: "A".to_string(),
                location: "X".to_string(),
                has_biryani: false,
                menu_items: vec![],
                latitude: None,
                longitude: None,
                // Stale stored counters must be overwritten
                true_count: 99,
                fake_count: 99,
            },
            Mosque {
                id: "2".to_string(),
                name: "B".to_string(),
                location: "Y".to_string(),
                has_biryani: false,
                menu_items: vec![],
                latitude: None,
                longitude: None,
                true_count: 0,
                fake_count: 0,
            },
        ];

        let tally = tally_votes(&[vote("1", "true"), vote("1", "fake"), vote("1", "fake")]);
        apply_tally(&mut mosques, &tally);

        assert_eq!(mosques[0].true_count, 1);
        assert_eq!(mosques[0].fake_count, 2);
        assert_eq!(mosques[1].true_count, 0);
        assert_eq!(mosques[1].fake_count, 0);
    }
}
