//! Cache Store Module
//!
//! Plain HashMap storage for cached responses. Locking lives one level up in
//! [`ExpiringCache`](crate::cache::ExpiringCache); the store itself is not
//! synchronized.

use std::collections::HashMap;

use bytes::Bytes;
use tokio::time::{Duration, Instant};

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key to entry mapping with a fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lifetime applied by `sweep_expired`
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous entry and
    /// restamping its creation instant.
    pub fn insert(&mut self, key: String, value: Bytes) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Returns the stored bytes for `key`.
    ///
    /// Does not check expiry: an entry is visible until a sweep removes it.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Sweep Expired ==
    /// Removes every entry whose `created_at + ttl` is strictly before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl, now));
        before - self.entries.len()
    }

    // == TTL ==
    /// Returns the lifetime applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
