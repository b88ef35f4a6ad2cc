// src/services/backend.rs

//! Hosted backend access.
//!
//! Talks to the PostgREST-style REST surface of the data service: select-all
//! reads on the `mosques` and `votes` tables, insert-one writes on both, and
//! exact-count HEAD probes used for change detection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ClientConfig, Mosque, NewMosque, NewVote, Vote};

/// A resolved endpoint: service URL plus public API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoint {
    pub url: String,
    pub key: String,
}

/// Row counts for both public tables, used as a change fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub mosques: u64,
    pub votes: u64,
}

/// Data service operations used by the tracker.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Select all mosque rows.
    async fn fetch_mosques(&self) -> Result<Vec<Mosque>>;

    /// Select all vote rows.
    async fn fetch_votes(&self) -> Result<Vec<Vote>>;

    /// Append one vote row.
    async fn insert_vote(&self, vote: &NewVote) -> Result<()>;

    /// Insert one mosque row and return the backend-assigned copy.
    async fn insert_mosque(&self, mosque: &NewMosque) -> Result<Mosque>;

    /// Exact row counts for both tables.
    async fn table_counts(&self) -> Result<TableCounts>;
}

/// REST implementation over the hosted service.
pub struct RestBackend {
    base: Url,
    key: String,
    client: Client,
}

impl RestBackend {
    /// Create a backend client for the given endpoint.
    pub fn new(endpoint: &BackendEndpoint, config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&endpoint.url)?.join("rest/v1/")?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base,
            key: endpoint.key.clone(),
            client,
        })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        Ok(self.base.join(table)?)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.key).bearer_auth(&self.key)
    }

    async fn select_all<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
    ) -> Result<Vec<T>> {
        let url = self.table_url(table)?;
        let response = self
            .authed(self.client.get(url))
            .query(&[("select", select)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejected(table, status, response).await);
        }
        Ok(response.json().await?)
    }

    async fn count_rows(&self, table: &str) -> Result<u64> {
        let url = self.table_url(table)?;
        let response = self
            .authed(self.client.head(url))
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejected(table, status, response).await);
        }

        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| AppError::backend(table, "count response missing Content-Range total"))
    }

    async fn rejected(table: &str, status: StatusCode, response: reqwest::Response) -> AppError {
        let body = response.text().await.unwrap_or_default();
        AppError::backend(table, format!("HTTP {status}: {body}"))
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn fetch_mosques(&self) -> Result<Vec<Mosque>> {
        self.select_all("mosques", "*").await
    }

    async fn fetch_votes(&self) -> Result<Vec<Vote>> {
        self.select_all("votes", "mosque_id,vote_type").await
    }

    async fn insert_vote(&self, vote: &NewVote) -> Result<()> {
        let url = self.table_url("votes")?;
        let response = self
            .authed(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(&[vote])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejected("votes", status, response).await);
        }
        Ok(())
    }

    async fn insert_mosque(&self, mosque: &NewMosque) -> Result<Mosque> {
        let url = self.table_url("mosques")?;
        let response = self
            .authed(self.client.post(url))
            .header("Prefer", "return=representation")
            .json(&[mosque])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejected("mosques", status, response).await);
        }

        let mut rows: Vec<Mosque> = response.json().await?;
        rows.pop()
            .ok_or_else(|| AppError::backend("mosques", "insert returned no representation"))
    }

    async fn table_counts(&self) -> Result<TableCounts> {
        let (mosques, votes) =
            futures::future::try_join(self.count_rows("mosques"), self.count_rows("votes"))
                .await?;
        Ok(TableCounts { mosques, votes })
    }
}

/// Parse the total from a `Content-Range` header value such as `0-24/3573`
/// or `*/0`.
fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}
