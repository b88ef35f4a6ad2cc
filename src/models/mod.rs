// src/models/mod.rs

//! Domain models for the iftar tracker.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod mosque;
mod seed;
mod vote;

// Re-export all public types
pub use config::{BackendConfig, ClientConfig, Config, WatchConfig};
pub use mosque::{Mosque, NewMosque};
pub use seed::Seed;
pub use vote::{NewVote, Vote, VoteCounts, VoteKind};
