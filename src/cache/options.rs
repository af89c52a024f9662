//! Set Options Module
//!
//! Per-call options accepted by `set`.

use std::time::Duration;

use crate::error::{CacheError, Result};

// == Set Options ==
/// Options for a single `set` call.
///
/// A `ttl` of `None` or zero falls back to the cache-wide default TTL; without
/// one the entry never expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Time to live for the entry
    pub ttl: Option<Duration>,
}

impl SetOptions {
    /// Options with no explicit TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the given TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }

    /// Options with a TTL given in signed milliseconds.
    ///
    /// Negative values are rejected with `CacheError::InvalidTtl`.
    pub fn ttl_ms(ttl_ms: i64) -> Result<Self> {
        let ms = u64::try_from(ttl_ms).map_err(|_| {
            CacheError::InvalidTtl(format!("TTL must be non-negative, got {}ms", ttl_ms))
        })?;
        Ok(Self::with_ttl(Duration::from_millis(ms)))
    }

    /// The TTL to apply, treating zero as unspecified.
    pub(crate) fn explicit_ttl(&self) -> Option<Duration> {
        self.ttl.filter(|ttl| !ttl.is_zero())
    }
}

impl From<Duration> for SetOptions {
    fn from(ttl: Duration) -> Self {
        Self::with_ttl(ttl)
    }
}
