// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading configuration and
//! seed data from files, and for resolving the backend endpoint from
//! configuration plus environment.

use std::env;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Config, Seed};
use crate::services::BackendEndpoint;

/// Environment variable overriding the configured backend URL.
pub const ENV_BACKEND_URL: &str = "IFTAR_BACKEND_URL";

/// Environment variable overriding the configured backend API key.
pub const ENV_BACKEND_KEY: &str = "IFTAR_BACKEND_KEY";

// Scaffold values shipped in sample configs; treated the same as absent.
const PLACEHOLDER_URL: &str = "https://your-project.supabase.co";
const PLACEHOLDER_KEY: &str = "your-anon-key";

/// Load configuration from a TOML file, falling back to defaults on failure.
pub fn load_config(path: &Path) -> Config {
    Config::load_or_default(path)
}

/// Load seed data from a TOML file, falling back to the bundled list.
pub fn load_seed(path: &Path) -> Seed {
    Seed::load_or_default(path)
}

/// Load and validate both config and seed data from the storage directory.
pub fn load_all(base_path: &Path) -> Result<(Config, Seed)> {
    let config = load_config(&base_path.join("config.toml"));
    config.validate()?;

    let seed = load_seed(&base_path.join("seed.toml"));
    seed.validate()
        .map_err(|e| AppError::config(format!("Invalid seed data: {e}")))?;

    Ok((config, seed))
}

/// Resolve the backend endpoint from environment and configuration.
///
/// Environment variables take precedence over the config file. Absence of
/// either value (or a placeholder value) leaves the backend unconfigured and
/// the tracker in seed-only mode.
pub fn resolve_endpoint(config: &Config) -> Option<BackendEndpoint> {
    let url = env::var(ENV_BACKEND_URL)
        .ok()
        .or_else(|| config.backend.url.clone());
    let key = env::var(ENV_BACKEND_KEY)
        .ok()
        .or_else(|| config.backend.key.clone());
    endpoint_from(url, key)
}

/// Build an endpoint from candidate values, rejecting blanks and
/// placeholders.
pub fn endpoint_from(url: Option<String>, key: Option<String>) -> Option<BackendEndpoint> {
    let url = url?.trim().to_string();
    let key = key?.trim().to_string();

    if url.is_empty() || key.is_empty() || url == PLACEHOLDER_URL || key == PLACEHOLDER_KEY {
        return None;
    }

    Some(BackendEndpoint { url, key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_requires_both_values() {
        assert!(endpoint_from(None, None).is_none());
        assert!(endpoint_from(Some("https://x.supabase.co".into()), None).is_none());
        assert!(endpoint_from(None, Some("key".into())).is_none());

        let endpoint =
            endpoint_from(Some("https://x.supabase.co".into()), Some("key".into())).unwrap();
        assert_eq!(endpoint.url, "https://x.supabase.co");
        assert_eq!(endpoint.key, "key");
    }

    #[test]
    fn test_endpoint_rejects_placeholders() {
        assert!(
            endpoint_from(
                Some(PLACEHOLDER_URL.to_string()),
                Some("real-key".to_string())
            )
            .is_none()
        );
        assert!(
            endpoint_from(
                Some("https://x.supabase.co".to_string()),
                Some(PLACEHOLDER_KEY.to_string())
            )
            .is_none()
        );
    }

    #[test]
    fn test_endpoint_rejects_blank_values() {
        assert!(endpoint_from(Some("  ".into()), Some("key".into())).is_none());
        assert!(endpoint_from(Some("https://x.supabase.co".into()), Some("".into())).is_none());
    }
}
