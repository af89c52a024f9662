//! Shared Cache Handle
//!
//! Thread-safe handle over a [`BoundedTtlCache`] for use from async tasks.

use std::borrow::Borrow;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;

use crate::cache::{BoundedTtlCache, CacheKey, CacheStats, SetOptions};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::spawn_sweeper_task;

/// Cloneable handle to one cache guarded by a single lock.
///
/// `get` and `has` reorder or purge entries, so they take the write guard just
/// like `set` and `delete`. Only inspections that mutate nothing use the read
/// guard.
pub struct SharedCache<K, V> {
    inner: Arc<RwLock<BoundedTtlCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: CacheKey + Clone, V> SharedCache<K, V> {
    /// Wraps an existing cache.
    pub fn new(cache: BoundedTtlCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a shared cache from configuration.
    ///
    /// No sweeper is started; see [`SharedCache::spawn_sweeper`].
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::new(BoundedTtlCache::with_config(config)?))
    }

    pub async fn set(&self, key: K, value: V, options: SetOptions) -> Result<()> {
        self.inner.write().await.set(key, value, options)
    }

    /// Returns a clone of the live value for `key`, promoting it.
    pub async fn get<Q>(&self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
        V: Clone,
    {
        // Write lock: a hit moves the entry to the front
        let mut cache = self.inner.write().await;
        Ok(cache.get(key)?.cloned())
    }

    pub async fn has<Q>(&self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        self.inner.write().await.has(key)
    }

    pub async fn delete<Q>(&self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        self.inner.write().await.delete(key)
    }

    pub async fn purge_expired(&self) -> usize {
        self.inner.write().await.purge_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Shared access for non-mutating inspection (`peek`, `keys`, ...).
    pub async fn read(&self) -> RwLockReadGuard<'_, BoundedTtlCache<K, V>> {
        self.inner.read().await
    }

    /// Exclusive access for batches of operations under one lock.
    pub async fn write(&self) -> RwLockWriteGuard<'_, BoundedTtlCache<K, V>> {
        self.inner.write().await
    }
}

impl<K, V> SharedCache<K, V>
where
    K: CacheKey + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Starts the background sweeper if `config` sets a sweep interval.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_sweeper(&self, config: &CacheConfig) -> Option<JoinHandle<()>> {
        config
            .sweep_interval
            .filter(|interval| !interval.is_zero())
            .map(|interval| spawn_sweeper_task(self.clone(), interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn shared(capacity: usize) -> SharedCache<String, String> {
        SharedCache::new(BoundedTtlCache::new(capacity).unwrap())
    }

    #[tokio::test]
    async fn test_shared_set_and_get() {
        let cache = shared(10);

        cache
            .set("k".to_string(), "v".to_string(), SetOptions::new())
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        assert!(cache.has("k").await.unwrap());
        assert_eq!(cache.len().await, 1);

        cache.delete("k").await.unwrap();
        assert!(cache.is_empty().await);
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_shared_clones_share_state() {
        let cache = shared(10);
        let other = cache.clone();

        other
            .set("k".to_string(), "v".to_string(), SetOptions::new())
            .await
            .unwrap();

        assert!(cache.has("k").await.unwrap());
        assert_eq!(cache.stats().await.total_entries, 1);
    }

    #[tokio::test]
    async fn test_shared_concurrent_writers_respect_capacity() {
        let cache = shared(8);

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for i in 0..50 {
                        cache
                            .set(format!("w{}-{}", worker, i), i.to_string(), SetOptions::new())
                            .await
                            .unwrap();
                        let _ = cache.get(&format!("w{}-{}", worker, i / 2)).await;
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 8);
        cache.read().await.assert_consistent();
    }

    #[tokio::test]
    async fn test_shared_spawn_sweeper_gated_by_config() {
        let cache = shared(10);

        assert!(cache.spawn_sweeper(&CacheConfig::default()).is_none());

        let config = CacheConfig::default().with_sweep_interval(Duration::from_millis(10));
        let handle = cache.spawn_sweeper(&config).expect("sweeper should start");
        handle.abort();
    }

    #[tokio::test]
    async fn test_shared_from_config() {
        let config = CacheConfig::default()
            .with_capacity(3)
            .with_default_ttl(Duration::from_secs(60));
        let cache: SharedCache<String, u32> = SharedCache::from_config(&config).unwrap();

        let guard = cache.read().await;
        assert_eq!(guard.capacity(), 3);
        assert_eq!(guard.default_ttl(), Some(Duration::from_secs(60)));
    }
}
