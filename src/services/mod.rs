//! Service layer for the iftar tracker.
//!
//! This module contains the backend-facing logic:
//! - Hosted data service access (`Backend`, `RestBackend`)
//! - Change notification (`PollingWatcher`)

mod backend;
#[cfg(feature = "watch")]
mod watch;

pub use backend::{Backend, BackendEndpoint, RestBackend, TableCounts};
#[cfg(feature = "watch")]
pub use watch::{ChangeEvent, PollingWatcher};
