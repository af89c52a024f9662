//! Bounded TTL Cache - an in-process key/value cache
//!
//! Bounds memory with least-recently-used eviction and expires entries lazily
//! by per-entry time-to-live.
//!
//! ```
//! use std::time::Duration;
//! use bounded_ttl_cache::{BoundedTtlCache, SetOptions};
//!
//! let mut cache = BoundedTtlCache::new(2).unwrap();
//! let ttl = SetOptions::with_ttl(Duration::from_secs(1));
//!
//! cache.set("a".to_string(), 1, ttl).unwrap();
//! cache.set("b".to_string(), 2, ttl).unwrap();
//! cache.get("a").unwrap();
//! cache.set("c".to_string(), 3, ttl).unwrap();
//!
//! assert!(!cache.has("b").unwrap());
//! assert!(cache.has("a").unwrap());
//! assert_eq!(cache.get("c").unwrap(), Some(&3));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;
pub mod tasks;

pub use cache::{BoundedTtlCache, CacheKey, CacheStats, SetOptions, DEFAULT_CAPACITY};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use shared::SharedCache;
pub use tasks::spawn_sweeper_task;
