//! Scoped replacement of a driver's cache.

use crate::analytics::ports::{AnalyticsDriver, CacheHandle};
use std::future::Future;
use std::sync::Arc;

/// Runs `operation` while `driver` uses `wrap(original)` as its cache.
///
/// The original cache is reinstated when the operation returns, fails,
/// panics, or is dropped before completion. Calls on the same driver wait
/// for each other through [`AnalyticsDriver::cache_swap_lock`], so a later
/// call never captures an earlier call's wrapper as its original.
pub async fn with_temporary_cache<W, F, Fut, T>(
    driver: &dyn AnalyticsDriver,
    wrap: W,
    operation: F,
) -> T
where
    W: FnOnce(CacheHandle) -> CacheHandle,
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let _swap = driver.cache_swap_lock().lock().await;
    let original = driver.cache();
    driver.set_cache(wrap(Arc::clone(&original)));
    let _restore = RestoreCacheGuard { driver, original };
    operation().await
}

struct RestoreCacheGuard<'a> {
    driver: &'a dyn AnalyticsDriver,
    original: CacheHandle,
}

impl Drop for RestoreCacheGuard<'_> {
    fn drop(&mut self) {
        self.driver.set_cache(Arc::clone(&self.original));
    }
}
