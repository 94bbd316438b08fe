//! In-memory cache adapter with optional entry expiry.

use crate::analytics::ports::{AnalyticsCache, CacheError, CacheResult};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Thread-safe in-memory analytics cache.
///
/// Entries stored with a TTL are treated as absent once the clock passes
/// their expiry, and are removed on the next write.
pub struct InMemoryAnalyticsCache<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    clock: Arc<C>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expiry| expiry > now)
    }
}

impl InMemoryAnalyticsCache<DefaultClock> {
    /// Creates an empty cache on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryAnalyticsCache<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryAnalyticsCache<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty cache on the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Returns the number of live entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when lock acquisition fails.
    pub fn len(&self) -> CacheResult<usize> {
        let now = self.clock.utc();
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.values().filter(|entry| entry.is_live(now)).count())
    }

    /// Returns whether no live entries exist.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when lock acquisition fails.
    pub fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<C> Clone for InMemoryAnalyticsCache<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryAnalyticsCache<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryAnalyticsCache")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<C> AnalyticsCache for InMemoryAnalyticsCache<C>
where
    C: Clock + Send + Sync,
{
    fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        let now = self.clock.utc();
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> CacheResult<()> {
        let now = self.clock.utc();
        let expires_at = ttl
            .map(|duration| {
                TimeDelta::from_std(duration)
                    .map(|delta| now + delta)
                    .map_err(CacheError::backend)
            })
            .transpose()?;
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(key.to_owned(), CacheEntry { value, expires_at });
        Ok(())
    }

    fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        Ok(entries.remove(key).is_some())
    }

    fn contains(&self, key: &str) -> CacheResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    fn clear(&self) -> CacheResult<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.clear();
        Ok(())
    }
}

fn lock_error<E: fmt::Display>(err: E) -> CacheError {
    CacheError::backend(std::io::Error::other(err.to_string()))
}
