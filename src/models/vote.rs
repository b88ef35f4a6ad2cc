//! Vote data structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mosque::string_or_number;

/// A recognized credibility tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    True,
    Fake,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::True => "true",
            VoteKind::Fake => "fake",
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(VoteKind::True),
            "fake" => Ok(VoteKind::Fake),
            other => Err(format!("unknown vote kind '{other}' (expected 'true' or 'fake')")),
        }
    }
}

/// A vote row as fetched from the backend.
///
/// The tag is kept as a raw string so a single malformed row cannot fail the
/// whole fetch; nothing upstream validates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    /// Identifier of the entry the vote references
    #[serde(deserialize_with = "string_or_number")]
    pub mosque_id: String,

    /// Raw tag value, expected to be "true" or "fake"
    pub vote_type: String,
}

impl Vote {
    /// Parse the raw tag. Unrecognized values yield `None` and are excluded
    /// from both counters.
    pub fn kind(&self) -> Option<VoteKind> {
        self.vote_type.parse().ok()
    }
}

/// Payload for casting a vote.
#[derive(Debug, Clone, Serialize)]
pub struct NewVote {
    pub mosque_id: String,
    pub vote_type: VoteKind,
}

/// Aggregated per-entry counters derived from the vote table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub true_count: u32,
    pub fake_count: u32,
}

impl VoteCounts {
    pub fn net_score(&self) -> i64 {
        i64::from(self.true_count) - i64::from(self.fake_count)
    }
}
