//! Fetch-through helpers: consult the cache, fall back to the fetcher, and
//! store only what came back successfully.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::Fetcher;
use crate::cache::ExpiringCache;
use crate::error::Result;

/// Where a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Remote,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "hit",
            Source::Remote => "miss",
        }
    }
}

/// A payload together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub body: T,
    pub source: Source,
}

/// Returns the cached bytes for `key`, fetching and caching them on a miss.
///
/// A failed fetch is returned to the caller and leaves the cache untouched.
pub async fn get_or_fetch<F>(cache: &ExpiringCache, fetcher: &F, key: &str) -> Result<Fetched<Bytes>>
where
    F: Fetcher + ?Sized,
{
    if let Some(body) = cache.get(key).await {
        debug!(key, "cache hit");
        return Ok(Fetched {
            body,
            source: Source::Cache,
        });
    }

    debug!(key, "cache miss, fetching");
    let body = fetcher.fetch(key).await.inspect_err(|err| {
        warn!(key, error = %err, "fetch failed, nothing cached");
    })?;

    cache.add(key, body.clone()).await;

    Ok(Fetched {
        body,
        source: Source::Remote,
    })
}

/// Like [`get_or_fetch`], then decodes the body as JSON.
///
/// A freshly fetched body is cached only if it decodes, so a cached hit
/// never needs re-validation.
pub async fn get_or_fetch_json<T, F>(
    cache: &ExpiringCache,
    fetcher: &F,
    key: &str,
) -> Result<Fetched<T>>
where
    T: DeserializeOwned,
    F: Fetcher + ?Sized,
{
    if let Some(body) = cache.get(key).await {
        debug!(key, "cache hit");
        return Ok(Fetched {
            body: serde_json::from_slice(&body)?,
            source: Source::Cache,
        });
    }

    debug!(key, "cache miss, fetching");
    let raw = fetcher.fetch(key).await.inspect_err(|err| {
        warn!(key, error = %err, "fetch failed, nothing cached");
    })?;

    let body: T = serde_json::from_slice(&raw).inspect_err(|err| {
        warn!(key, error = %err, "undecodable response, nothing cached");
    })?;

    cache.add(key, raw).await;

    Ok(Fetched {
        body,
        source: Source::Remote,
    })
}
