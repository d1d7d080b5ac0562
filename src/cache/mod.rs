//! Cache Module
//!
//! Provides an in-memory response cache with periodic TTL expiration.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::ExpiringCache;
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;
