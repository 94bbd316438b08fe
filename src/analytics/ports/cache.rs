//! Cache port used by drivers for expensive analytics lookups.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Shared handle to the cache a driver currently uses.
pub type CacheHandle = Arc<dyn AnalyticsCache>;

/// Key/value cache contract.
///
/// Values are JSON documents so drivers can store any serializable
/// report shape.
pub trait AnalyticsCache: Send + Sync + std::fmt::Debug {
    /// Returns the value stored under `key`, or `None` on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backing store fails.
    fn get(&self, key: &str) -> CacheResult<Option<Value>>;

    /// Stores `value` under `key`, expiring after `ttl` when given.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backing store fails.
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> CacheResult<()>;

    /// Removes `key`, returning whether an entry existed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backing store fails.
    fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Returns whether a live entry exists for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backing store fails.
    fn contains(&self, key: &str) -> CacheResult<bool>;

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backing store fails.
    fn clear(&self) -> CacheResult<()>;
}

/// Errors returned by cache adapters.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// Backing store failure.
    #[error("cache backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl CacheError {
    /// Wraps a backing store error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
