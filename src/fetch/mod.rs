//! Fetch Module
//!
//! The seam between callers, the cache and the network. A [`Fetcher`]
//! retrieves raw payloads on a miss; [`get_or_fetch`] wires it to an
//! [`ExpiringCache`](crate::cache::ExpiringCache) so that only successful
//! retrievals are ever stored.

mod http;
mod through;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub use http::HttpFetcher;
pub use through::{get_or_fetch, get_or_fetch_json, Fetched, Source};

/// Retrieves the raw payload identified by an opaque key.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the complete body of a successful retrieval, or an error.
    async fn fetch(&self, key: &str) -> Result<Bytes>;
}
