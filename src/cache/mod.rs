//! Cache Module
//!
//! Provides an in-memory key/value cache with lazy TTL expiration and LRU eviction.

mod entry;
mod key;
mod lru;
mod options;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use lru::LruList;
pub use options::SetOptions;
pub use stats::CacheStats;
pub use store::BoundedTtlCache;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 100;

/// Maximum allowed string key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
