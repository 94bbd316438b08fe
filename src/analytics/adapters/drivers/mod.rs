//! Built-in analytics driver implementations.

pub mod google;
pub mod null;

pub use google::{GOOGLE_DRIVER_NAME, GoogleAnalyticsDriver, GoogleAnalyticsSettings};
pub use null::{NULL_DRIVER_NAME, NullDriver};

use crate::analytics::ports::CacheHandle;
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;

/// Swappable cache handle shared by driver implementations.
///
/// Temporary replacements hold [`Self::swap_lock`] for their whole scope,
/// so overlapping replacements on one driver run one after another.
#[derive(Debug)]
pub struct CacheSlot {
    current: RwLock<CacheHandle>,
    swap_lock: Mutex<()>,
}

impl CacheSlot {
    /// Creates a slot holding `cache`.
    #[must_use]
    pub fn new(cache: CacheHandle) -> Self {
        Self {
            current: RwLock::new(cache),
            swap_lock: Mutex::new(()),
        }
    }

    /// Returns the lock serialising temporary cache replacements.
    #[must_use]
    pub const fn swap_lock(&self) -> &Mutex<()> {
        &self.swap_lock
    }

    /// Returns the cache currently installed.
    #[must_use]
    pub fn get(&self) -> CacheHandle {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `cache`.
    pub fn replace(&self, cache: CacheHandle) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = cache;
    }
}
