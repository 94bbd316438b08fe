//! Cache decorator that reports every read as a miss.

use crate::analytics::ports::{AnalyticsCache, CacheHandle, CacheResult};
use serde_json::Value;
use std::time::Duration;

/// Wraps a cache so reads always miss while writes reach the inner cache.
///
/// Installed during a manual refresh: the driver recomputes every lookup
/// from its provider and the fresh results still land in the real cache,
/// which is never cleared, so concurrent readers keep their warm entries.
#[derive(Debug, Clone)]
pub struct WriteOnlyCache {
    inner: CacheHandle,
}

impl WriteOnlyCache {
    /// Wraps `inner`.
    #[must_use]
    pub const fn new(inner: CacheHandle) -> Self {
        Self { inner }
    }

    /// Returns the wrapped cache.
    #[must_use]
    pub const fn inner(&self) -> &CacheHandle {
        &self.inner
    }
}

impl AnalyticsCache for WriteOnlyCache {
    fn get(&self, _key: &str) -> CacheResult<Option<Value>> {
        Ok(None)
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> CacheResult<()> {
        self.inner.set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> CacheResult<bool> {
        self.inner.delete(key)
    }

    fn contains(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    fn clear(&self) -> CacheResult<()> {
        self.inner.clear()
    }
}
