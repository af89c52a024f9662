//! Expiry Sweeper Task
//!
//! Background task that periodically purges expired cache entries.
//!
//! Reads keep their lazy expiry checks whether or not a sweeper runs; the
//! sweep only frees slots held by expired entries nobody has read.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheKey;
use crate::shared::SharedCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task loops forever, sleeping for `interval` between sweeps and holding
/// the write guard only for the duration of each purge.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it to stop sweeping.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::new(BoundedTtlCache::new(1000)?);
/// let sweeper = spawn_sweeper_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper_task<K, V>(cache: SharedCache<K, V>, interval: Duration) -> JoinHandle<()>
where
    K: CacheKey + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting expiry sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
