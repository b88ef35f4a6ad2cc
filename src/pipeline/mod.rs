//! The aggregation pipeline: fetch results flow through
//! merge → tally → rank into a display-ready snapshot.
//!
//! - `merge_entries`: combine fetched rows with the seed list, id-unique
//! - `tally_votes` / `apply_tally`: reduce vote rows into per-entry counters
//! - `search_and_rank`: substring filter plus stable net-score ordering
//! - `Snapshot`: the assembled result of one full run

pub mod merge;
pub mod rank;
pub mod snapshot;
pub mod tally;

pub use merge::merge_entries;
pub use rank::{filter_entries, rank_entries, search_and_rank};
pub use snapshot::Snapshot;
pub use tally::{apply_tally, tally_votes};
