//! pokecache - An expiring in-memory response cache
//!
//! Memoizes raw catalog responses for a fixed TTL and evicts them with a
//! periodic background sweep.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod tasks;

pub use cache::{CacheStats, ExpiringCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use fetch::{get_or_fetch, get_or_fetch_json, Fetched, Fetcher, HttpFetcher, Source};
