//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// TTL applied when `set` is called without one, None = never expires
    pub default_ttl: Option<Duration>,
    /// Background sweep interval, None = lazy expiry only
    pub sweep_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: unset, 0 = unset)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep interval in milliseconds (default: unset, 0 = unset)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&c| c > 0)
                .unwrap_or(DEFAULT_CAPACITY),
            default_ttl: millis_from_env("CACHE_DEFAULT_TTL_MS"),
            sweep_interval: millis_from_env("CACHE_SWEEP_INTERVAL_MS"),
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the default TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = non_zero(ttl);
        self
    }

    /// Enables the background sweeper at the given interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = non_zero(interval);
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: None,
            sweep_interval: None,
        }
    }
}

fn millis_from_env(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .and_then(non_zero)
}

fn non_zero(duration: Duration) -> Option<Duration> {
    (!duration.is_zero()).then_some(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.default_ttl, None);
        assert_eq!(config.sweep_interval, None);
    }

    #[test]
    fn test_config_builders() {
        let config = CacheConfig::default()
            .with_capacity(10)
            .with_default_ttl(Duration::from_millis(500))
            .with_sweep_interval(Duration::ZERO);

        assert_eq!(config.capacity, 10);
        assert_eq!(config.default_ttl, Some(Duration::from_millis(500)));
        // Zero interval means no sweeper
        assert_eq!(config.sweep_interval, None);
    }

    // Env vars are process-global, so every env scenario lives in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_SWEEP_INTERVAL_MS");

        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var("CACHE_CAPACITY", "42");
        env::set_var("CACHE_DEFAULT_TTL_MS", "1500");
        env::set_var("CACHE_SWEEP_INTERVAL_MS", "0");

        let config = CacheConfig::from_env();
        assert_eq!(config.capacity, 42);
        assert_eq!(config.default_ttl, Some(Duration::from_millis(1500)));
        assert_eq!(config.sweep_interval, None);

        // Unparseable and zero capacities fall back to the default
        env::set_var("CACHE_CAPACITY", "0");
        assert_eq!(CacheConfig::from_env().capacity, 100);
        env::set_var("CACHE_CAPACITY", "lots");
        assert_eq!(CacheConfig::from_env().capacity, 100);

        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_SWEEP_INTERVAL_MS");
    }
}
