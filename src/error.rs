//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Misses are not errors: `get` and `has` report absence through their
/// return values, and capacity overflow is resolved by eviction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key cannot be used as an index
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// TTL is negative or cannot be represented
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
