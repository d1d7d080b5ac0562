//! Error types for the response cache and its fetch layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
///
/// The cache itself only fails at construction; every other variant comes
/// from the fetch layer and never reaches the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// TTL rejected at construction
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// No Tokio runtime to host the sweep task
    #[error("No Tokio runtime available: {0}")]
    NoRuntime(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport-level failure talking to the remote catalog
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Payload could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
