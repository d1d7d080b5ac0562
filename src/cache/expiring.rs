//! Expiring Cache Module
//!
//! The caller-facing cache: a shared [`CacheStore`] behind a reader/writer
//! lock, plus the background sweep that evicts expired entries.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore, StatsCounters};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

// == Expiring Cache ==
/// Thread-safe response cache with a fixed TTL.
///
/// Reads take the shared lock and may run in parallel; writes and sweep
/// passes take the exclusive lock. Reads never check expiry themselves, so an
/// entry stays visible for up to one sweep interval past its deadline.
///
/// The sweep task lives as long as the cache. Share the cache with
/// `Arc<ExpiringCache>`; dropping the last handle (or calling
/// [`shutdown`](Self::shutdown)) stops the sweep.
#[derive(Debug)]
pub struct ExpiringCache {
    store: Arc<RwLock<CacheStore>>,
    counters: Arc<StatsCounters>,
    ttl: Duration,
    sweeper: JoinHandle<()>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates an empty cache and starts its sweep task.
    ///
    /// The sweep is spawned on the Tokio runtime the caller is running in.
    ///
    /// # Errors
    /// - `CacheError::InvalidTtl` if `ttl` is zero
    /// - `CacheError::NoRuntime` if called outside a Tokio runtime
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl(
                "TTL must be greater than zero".to_string(),
            ));
        }

        let runtime =
            Handle::try_current().map_err(|err| CacheError::NoRuntime(err.to_string()))?;

        let store = Arc::new(RwLock::new(CacheStore::new(ttl)));
        let counters = Arc::new(StatsCounters::new());
        let sweeper = spawn_sweep_task(&runtime, Arc::clone(&store), Arc::clone(&counters), ttl);

        info!(ttl_ms = ttl.as_millis() as u64, "Expiring cache created");

        Ok(Self {
            store,
            counters,
            ttl,
            sweeper,
        })
    }

    // == Add ==
    /// Inserts or overwrites `key`, stamping the entry with the current time.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, bytes = value.len(), "cache add");

        self.store.write().await.insert(key, value);
        self.counters.record_insert();
    }

    // == Get ==
    /// Returns the bytes stored under `key`, if any entry is present.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let value = self.store.read().await.get(key);

        match value {
            Some(_) => self.counters.record_hit(),
            None => self.counters.record_miss(),
        }
        value
    }

    // == Stats ==
    /// Returns a snapshot of cache activity.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.store.read().await.len();
        self.counters.snapshot(total_entries)
    }

    // == Length ==
    /// Number of entries currently held, including expired but unswept ones.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == TTL ==
    /// Returns the entry lifetime, which is also the sweep interval.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Shutdown ==
    /// Stops the sweep task and releases the cache.
    ///
    /// Dropping the cache has the same effect.
    pub fn shutdown(self) {
        info!("Expiring cache shutting down");
    }
}

impl Drop for ExpiringCache {
    fn drop(&mut self) {
        self.sweeper.abort();
        debug!("TTL sweep task aborted");
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn test_new_rejects_zero_ttl() {
        let result = ExpiringCache::new(Duration::ZERO);
        assert!(matches!(result, Err(CacheError::InvalidTtl(_))));
    }

    #[test]
    fn test_new_outside_runtime_returns_error() {
        let result = ExpiringCache::new(TTL);
        assert!(matches!(result, Err(CacheError::NoRuntime(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_cache_is_empty() {
        let cache = ExpiringCache::new(TTL).unwrap();

        assert!(cache.is_empty().await);
        assert_eq!(cache.ttl(), TTL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_miss_then_hit() {
        let cache = ExpiringCache::new(TTL).unwrap();

        assert!(cache.get("k").await.is_none());
        cache.add("k", Bytes::from_static(b"v")).await;
        assert_eq!(cache.get("k").await, Some(Bytes::from_static(b"v")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_returns_latest() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("k", "v1").await;
        cache.add("k", "v2").await;

        assert_eq!(cache.get("k").await, Some(Bytes::from_static(b"v2")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_sweep() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("area-1", vec![0x7bu8, 0x7d]).await;
        assert_eq!(cache.get("area-1").await, Some(Bytes::from_static(b"{}")));

        tokio::time::sleep(TTL * 2 + Duration::from_millis(50)).await;

        assert!(cache.get("area-1").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_premature_expiration() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("k", "v").await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.get("k").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_read_before_next_sweep() {
        let cache = ExpiringCache::new(TTL).unwrap();

        // Stored at 10ms: deadline 110ms, first sweep that can remove it is 200ms
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.add("k", "v").await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(cache.get("k").await.is_some(), "unswept entry stays visible");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_keys() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("k1", "v1").await;
        tokio::time::sleep(TTL * 2 + Duration::from_millis(50)).await;
        cache.add("k2", "v2").await;

        assert!(cache.get("k1").await.is_none());
        assert_eq!(cache.get("k2").await, Some(Bytes::from_static(b"v2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_track_activity() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("k", "v").await;
        cache.get("k").await;
        cache.get("missing").await;
        tokio::time::sleep(TTL * 2 + Duration::from_millis(50)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.sweeps, 2);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_sweeping() {
        let cache = ExpiringCache::new(TTL).unwrap();
        let counters = Arc::clone(&cache.counters);

        cache.shutdown();
        tokio::time::sleep(TTL * 3).await;

        assert_eq!(counters.snapshot(0).sweeps, 0);
    }
}
