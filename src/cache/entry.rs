//! Cache Entry Module
//!
//! Defines a single cached response and its insertion timestamp.

use bytes::Bytes;
use tokio::time::{Duration, Instant};

// == Cache Entry ==
/// Raw response bytes plus the instant they were stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, uninterpreted
    pub value: Bytes,
    /// Insertion (or last overwrite) instant
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is past its lifetime at `now`.
    ///
    /// Boundary condition: an entry expires only once `created_at + ttl` is
    /// strictly before `now`. At exactly `created_at + ttl` it is still live.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.created_at + ttl < now
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation() {
        let entry = CacheEntry::new(Bytes::from_static(b"{}"));

        assert_eq!(entry.value, Bytes::from_static(b"{}"));
        assert_eq!(entry.age(), Duration::ZERO);
        assert!(!entry.is_expired(Duration::from_millis(100), Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let ttl = Duration::from_millis(100);
        let entry = CacheEntry::new(Bytes::from_static(b"payload"));

        tokio::time::advance(Duration::from_millis(150)).await;

        assert!(entry.is_expired(ttl, Instant::now()));
        assert_eq!(entry.age(), Duration::from_millis(150));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let ttl = Duration::from_secs(1);
        let entry = CacheEntry::new(Bytes::new());
        let deadline = entry.created_at + ttl;

        // Exactly at the deadline the entry is still live
        assert!(!entry.is_expired(ttl, deadline));
        assert!(entry.is_expired(ttl, deadline + Duration::from_nanos(1)));
    }
}
