// src/pipeline/merge.rs

//! Entry merging: combine fetched rows with the bundled seed list.

use std::collections::HashSet;

use crate::models::Mosque;

/// Merge server-fetched entries with the seed list.
///
/// The result carries no duplicate identifiers. On conflict the fetched copy
/// wins; order is all fetched entries first, then the remainder of the seed.
/// An empty fetched list leaves the seed unchanged.
pub fn merge_entries(fetched: Vec<Mosque>, seed: Vec<Mosque>) -> Vec<Mosque> {
    let mut merged = Vec::with_capacity(fetched.len() + seed.len());
    let mut seen: HashSet<String> = HashSet::new();

    for entry in fetched.into_iter().chain(seed) {
        if seen.insert(entry.id.clone()) {
            merged.push(entry);
        }
    }

    merged
}
