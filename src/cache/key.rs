//! Cache Key Module
//!
//! Defines which types can index the cache and how they are validated.

use std::hash::Hash;
use std::sync::Arc;

use crate::cache::MAX_KEY_LENGTH;
use crate::error::{CacheError, Result};

// == Cache Key ==
/// A type usable as a cache key.
///
/// `validate` is called by every public cache operation before the key touches
/// the index. The default accepts everything; string keys reject empty and
/// oversized values. Unsized impls (`str`) let owned keys be looked up by
/// their borrowed form.
pub trait CacheKey: Hash + Eq {
    /// Returns an error if the key cannot be used as an index.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn validate_str(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

impl CacheKey for String {
    fn validate(&self) -> Result<()> {
        validate_str(self)
    }
}

impl CacheKey for str {
    fn validate(&self) -> Result<()> {
        validate_str(self)
    }
}

impl CacheKey for &str {
    fn validate(&self) -> Result<()> {
        validate_str(self)
    }
}

impl CacheKey for Arc<str> {
    fn validate(&self) -> Result<()> {
        validate_str(self)
    }
}

impl CacheKey for Box<str> {
    fn validate(&self) -> Result<()> {
        validate_str(self)
    }
}

macro_rules! impl_integer_key {
    ($($t:ty),*) => {
        $(impl CacheKey for $t {})*
    };
}

impl_integer_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
