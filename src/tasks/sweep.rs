//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::cache::{CacheStore, StatsCounters};

/// Spawns the sweep that evicts expired entries from `store`.
///
/// Passes run on `runtime` at a fixed rate of one per `interval` (the cache
/// TTL), starting one interval after spawn. Each pass snapshots the current
/// instant, then holds the write lock while it walks every entry, so callers
/// never observe a half-swept map.
///
/// # Returns
/// A JoinHandle for the spawned task. Aborting it stops expiration.
///
/// # Panics
/// If `interval` is zero. `ExpiringCache::new` rejects a zero TTL first.
///
/// # Example
/// ```ignore
/// let ttl = Duration::from_secs(300);
/// let store = Arc::new(RwLock::new(CacheStore::new(ttl)));
/// let counters = Arc::new(StatsCounters::new());
/// let handle = spawn_sweep_task(&Handle::current(), store.clone(), counters, ttl);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task(
    runtime: &Handle,
    store: Arc<RwLock<CacheStore>>,
    counters: Arc<StatsCounters>,
    interval: Duration,
) -> JoinHandle<()> {
    info!(interval_ms = interval.as_millis() as u64, "Starting TTL sweep task");

    spawn_periodic(runtime, "ttl-sweep", interval, move || {
        let store = Arc::clone(&store);
        let counters = Arc::clone(&counters);
        async move {
            sweep_once(&store, &counters).await;
        }
    })
}

/// Runs one sweep pass and returns how many entries it removed.
async fn sweep_once(store: &RwLock<CacheStore>, counters: &StatsCounters) -> usize {
    let now = Instant::now();

    let (removed, remaining) = {
        let mut guard = store.write().await;
        let removed = guard.sweep_expired(now);
        (removed, guard.len())
    };

    counters.record_sweep(removed);

    if removed > 0 {
        info!(removed, remaining, "TTL sweep: removed expired entries");
    } else {
        debug!(remaining, "TTL sweep: no expired entries found");
    }

    removed
}

/// Runs `pass` once every `interval`, forever.
///
/// Ticks are fixed-rate: a slow pass does not push later ticks back, and a
/// tick missed entirely is delayed rather than replayed in a burst. Each pass
/// is spawned as its own task so a panic inside it is caught as a
/// `JoinError`, logged, and the loop moves on to the next tick.
pub(crate) fn spawn_periodic<F, Fut>(
    runtime: &Handle,
    name: &'static str,
    interval: Duration,
    mut pass: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let runtime = runtime.clone();

    runtime.clone().spawn(async move {
        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(err) = runtime.spawn(pass()).await {
                if err.is_cancelled() {
                    debug!(task = name, "Periodic pass cancelled, stopping");
                    break;
                }
                error!(task = name, error = %err, "Periodic pass failed, retrying next tick");
            }
        }
    })
}
