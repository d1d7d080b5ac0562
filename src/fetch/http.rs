//! HTTP Fetcher
//!
//! `reqwest`-backed [`Fetcher`] for a remote JSON catalog.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::Fetcher;
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Fetches catalog resources over HTTP.
///
/// Keys that already are absolute URLs (paginated listings hand out their
/// `next`/`previous` links that way) are requested as-is. Any other key is
/// treated as a path under `base_url`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http_client: Client,
    base_url: String,
}

impl HttpFetcher {
    /// Builds a fetcher with its own connection pool.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url.clone(), config.http_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Resolve ==
    /// Maps a cache key to the URL it is fetched from.
    pub fn resolve(&self, key: &str) -> String {
        if key.starts_with("http://") || key.starts_with("https://") {
            key.to_string()
        } else {
            format!("{}/{}", self.base_url, key.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, key: &str) -> Result<Bytes> {
        let url = self.resolve(key);
        debug!(url = %url, "GET");

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Remote returned an error status");
            return Err(CacheError::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
