//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with an arena-backed LRU list
//! and lazy TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheKey, CacheStats, LruList, SetOptions, DEFAULT_CAPACITY};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOCATE_LIMIT: usize = 1024;

// == Bounded TTL Cache ==
/// Key/value cache with a fixed entry bound, LRU eviction and lazy TTL expiry.
///
/// The index maps each key to the arena slot of its entry in the recency
/// list, so both structures always hold the same keys. Expired entries keep
/// their slot until a read, a sweep or eviction removes them.
///
/// Every operation that can promote or purge takes `&mut self`; wrap the
/// cache in [`crate::SharedCache`] to use it from several tasks.
#[derive(Debug)]
pub struct BoundedTtlCache<K, V> {
    /// Key to arena slot
    index: HashMap<K, usize>,
    /// Entries ordered from most to least recently used
    order: LruList<CacheEntry<K, V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL for entries set without one
    default_ttl: Option<Duration>,
}

impl<K: CacheKey + Clone, V> Default for BoundedTtlCache<K, V> {
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY, None)
    }
}

impl<K: CacheKey + Clone, V> BoundedTtlCache<K, V> {
    // == Constructors ==
    /// Creates a cache holding at most `capacity` entries, without a default TTL.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self::build(capacity, None))
    }

    /// Creates a cache from configuration.
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        check_capacity(config.capacity)?;
        Ok(Self::build(
            config.capacity,
            config.default_ttl.filter(|ttl| !ttl.is_zero()),
        ))
    }

    fn build(capacity: usize, default_ttl: Option<Duration>) -> Self {
        let prealloc = capacity.min(PREALLOCATE_LIMIT);
        Self {
            index: HashMap::with_capacity(prealloc),
            order: LruList::with_capacity(prealloc),
            stats: CacheStats::new(),
            capacity,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// An existing key has its value and expiry replaced and becomes most
    /// recently used. A new key is inserted as most recently used; if the cache
    /// is full, the least recently used entry is evicted first.
    ///
    /// All validation runs before the cache is touched, so an error leaves it
    /// unchanged.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `options` - Per-entry TTL (falls back to the default TTL)
    pub fn set(&mut self, key: K, value: V, options: SetOptions) -> Result<()> {
        key.validate()?;
        let now = Instant::now();
        let expires_at = self.expiry_for(now, options)?;

        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(idx) {
                entry.value = value;
                entry.created_at = now;
                entry.expires_at = expires_at;
            }
            self.order.move_to_front(idx);
            return Ok(());
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let idx = self
            .order
            .push_front(CacheEntry::new(key.clone(), value, now, expires_at));
        self.index.insert(key, idx);

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key, promoting it to most recently used.
    ///
    /// Returns `Ok(None)` if the key is absent or expired. Expired entries are
    /// purged and counted as misses.
    pub fn get<Q>(&mut self, key: &Q) -> Result<Option<&V>>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        key.validate()?;

        let Some(idx) = self.live_slot(key) else {
            self.stats.record_miss();
            return Ok(None);
        };

        self.stats.record_hit();
        self.order.move_to_front(idx);
        Ok(self.order.get(idx).map(|entry| &entry.value))
    }

    // == Has ==
    /// Checks whether a live entry exists for `key`.
    ///
    /// Recency is left untouched. An expired entry is purged, same as `get`.
    pub fn has<Q>(&mut self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        key.validate()?;
        Ok(self.live_slot(key).is_some())
    }

    // == Delete ==
    /// Removes an entry by key. Deleting a missing key is a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        key.validate()?;
        if let Some(idx) = self.index.remove(key) {
            self.order.remove(idx);
        }
        Ok(())
    }

    // == Peek ==
    /// Returns a live value without promoting it or purging anything.
    pub fn peek<Q>(&self, key: &Q) -> Result<Option<&V>>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        key.validate()?;
        let now = Instant::now();
        Ok(self
            .entry(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value))
    }

    /// Returns how long a live entry has left.
    ///
    /// `None` if the key is absent, expired, or never expires.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Result<Option<Duration>>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        key.validate()?;
        let now = Instant::now();
        Ok(self
            .entry(key)
            .filter(|entry| !entry.is_expired_at(now))
            .and_then(|entry| entry.ttl_remaining_at(now)))
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<usize> = self
            .index
            .values()
            .copied()
            .filter(|&idx| {
                self.order
                    .get(idx)
                    .is_some_and(|entry| entry.is_expired_at(now))
            })
            .collect();

        for &idx in &expired {
            if let Some(entry) = self.order.remove(idx) {
                self.index.remove(&entry.key);
            }
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Resize ==
    /// Changes the capacity, evicting least recently used entries until the
    /// cache fits.
    ///
    /// Returns the number of entries evicted.
    pub fn resize(&mut self, capacity: usize) -> Result<usize> {
        check_capacity(capacity)?;

        let mut evicted = 0;
        while self.index.len() > capacity && self.evict_lru() {
            evicted += 1;
        }
        self.capacity = capacity;

        debug!(capacity, evicted, "Cache resized");
        Ok(evicted)
    }

    /// Removes every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    /// Keys from most to least recently used, expired entries included.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter().map(|entry| &entry.key)
    }

    // == Length ==
    /// Returns the number of stored entries, counting expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    // == Internals ==
    fn entry<Q>(&self, key: &Q) -> Option<&CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        self.index.get(key).and_then(|&idx| self.order.get(idx))
    }

    /// Slot of the live entry for `key`, purging it first if it has expired.
    fn live_slot<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: CacheKey + ?Sized,
    {
        let idx = *self.index.get(key)?;
        let expired = self
            .order
            .get(idx)
            .map_or(true, |entry| entry.is_expired_at(Instant::now()));

        if !expired {
            return Some(idx);
        }

        self.index.remove(key);
        self.order.remove(idx);
        self.stats.record_expirations(1);
        debug!(slot = idx, "Purged expired entry on read");
        None
    }

    /// Evicts the tail of the recency list. Returns false if the cache is empty.
    fn evict_lru(&mut self) -> bool {
        match self.order.pop_back() {
            Some(entry) => {
                self.index.remove(&entry.key);
                self.stats.record_eviction();
                debug!(
                    capacity = self.capacity,
                    expired = entry.is_expired(),
                    "Evicted least recently used entry"
                );
                true
            }
            None => false,
        }
    }

    fn expiry_for(&self, now: Instant, options: SetOptions) -> Result<Option<Instant>> {
        match options.explicit_ttl().or(self.default_ttl) {
            None => Ok(None),
            Some(ttl) => now.checked_add(ttl).map(Some).ok_or_else(|| {
                CacheError::InvalidTtl(format!("TTL of {:?} is out of range", ttl))
            }),
        }
    }

    /// Asserts that the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.order.len(), "index/order size mismatch");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");
        for (key, &idx) in &self.index {
            let entry = self.order.get(idx);
            assert!(
                entry.is_some_and(|entry| entry.key == *key),
                "index points at a slot holding another key"
            );
        }
        assert_eq!(self.keys().count(), self.index.len(), "list is not fully linked");
    }
}

fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(CacheError::InvalidCapacity(capacity));
    }
    Ok(())
}
