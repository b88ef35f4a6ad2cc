// src/pipeline/rank.rs

//! Search filtering and net-score ranking over the merged entry list.

use std::cmp::Reverse;

use crate::models::Mosque;

/// Retain entries whose name or location contains the term,
/// case-insensitively. An empty (or whitespace-only) term retains all.
pub fn filter_entries(entries: &[Mosque], term: &str) -> Vec<Mosque> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle) || m.location.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Order entries descending by net score. Ties keep their original
/// relative order (the sort is stable).
pub fn rank_entries(entries: &mut [Mosque]) {
    entries.sort_by_key(|m| Reverse(m.net_score()));
}

/// Filter by search term, then rank by net score.
pub fn search_and_rank(entries: &[Mosque], term: &str) -> Vec<Mosque> {
    let mut retained = filter_entries(entries, term);
    rank_entries(&mut retained);
    retained
}
