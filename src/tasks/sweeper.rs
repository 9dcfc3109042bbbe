//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries, so keys
//! written once and never read again do not pile up.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::SharedCache;

// == Sweeper Handle ==
/// Owner of the running sweep task. Call `stop` on teardown.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Cancels the task. Safe to call after it has already finished.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns the sweep loop on the current tokio runtime.
///
/// Each tick takes the cache write lock and runs one `sweep_expired` pass.
/// Passes run inside a single task, so they never overlap; ticks missed
/// while a pass holds the lock are skipped rather than bunched up.
///
/// # Example
/// ```ignore
/// let cache = cache::shared(CacheStore::new());
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweeper.stop();
/// ```
pub fn spawn_sweeper(cache: SharedCache, period: Duration) -> SweeperHandle {
    let task = tokio::spawn(async move {
        info!("Starting expiry sweeper with period of {:?}", period);

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let (removed, remaining) = {
                let mut store = cache.write().await;
                (store.sweep_expired(), store.len())
            };

            if removed > 0 {
                info!(
                    "Expiry sweep: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    });

    SweeperHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{self, CacheKey, CacheStore, Category, ManualClock};
    use serde_json::json;
    use std::sync::Arc;

    const PERIOD: Duration = Duration::from_millis(50);

    fn cache_with_clock() -> (SharedCache, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let store = CacheStore::with_clock(Arc::new(clock.clone()));
        (cache::shared(store), clock)
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries_without_reads() {
        let (cache, clock) = cache_with_clock();
        {
            let mut store = cache.write().await;
            store.set(&CacheKey::new(Category::MatchData, "1"), json!(1));
            store.set(&CacheKey::new(Category::MatchData, "2"), json!(2));
            store.set(&CacheKey::new(Category::LeagueData, "271"), json!(3));
        }

        let sweeper = spawn_sweeper(cache.clone(), PERIOD);

        // Match data expires after an hour, league data after a week.
        clock.advance(Duration::from_secs(3_601));
        tokio::time::sleep(PERIOD * 4).await;

        {
            let store = cache.read().await;
            let stats = store.stats();
            assert_eq!(stats.keys, vec!["leagueData:271"]);
            assert_eq!(stats.counters.swept, 2);
            assert_eq!(stats.counters.misses, 0, "no read was made");
        }

        sweeper.stop();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let (cache, _clock) = cache_with_clock();
        let key = CacheKey::new(Category::TeamLogos, "53");
        cache.write().await.set(&key, json!("crest.png"));

        let sweeper = spawn_sweeper(cache.clone(), PERIOD);
        tokio::time::sleep(PERIOD * 3).await;

        assert_eq!(cache.write().await.get(&key), Some(json!("crest.png")));
        sweeper.stop();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_stopped() {
        let (cache, _clock) = cache_with_clock();
        let sweeper = spawn_sweeper(cache, PERIOD);

        sweeper.stop();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(sweeper.is_finished(), "Task should be finished after stop");
    }
}
