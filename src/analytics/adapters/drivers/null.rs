//! Driver that collects nothing.

use super::CacheSlot;
use crate::analytics::{
    adapters::cache::InMemoryAnalyticsCache,
    domain::{AnalyticsDataSet, DriverOptions, OptionsSchema, SchemaTag},
    ports::{AnalyticsDriver, CacheHandle, DriverResult},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Registry key conventionally used for [`NullDriver`].
pub const NULL_DRIVER_NAME: &str = "null";

const SCHEMA_TAG: &str = "null_options";

/// Placeholder driver with no options, no data and no embed code.
#[derive(Debug)]
pub struct NullDriver {
    cache: CacheSlot,
}

impl NullDriver {
    /// Creates the driver with a private in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: CacheSlot::new(Arc::new(InMemoryAnalyticsCache::new())),
        }
    }
}

impl Default for NullDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsDriver for NullDriver {
    fn label(&self) -> String {
        "None".to_owned()
    }

    fn installation_instructions(&self) -> String {
        "<p>No analytics provider is configured. Nothing needs to be installed.</p>".to_owned()
    }

    fn options_schema(&self) -> OptionsSchema {
        OptionsSchema::new(SchemaTag::new(SCHEMA_TAG))
    }

    async fn validate(&self, options: &DriverOptions) -> bool {
        self.options_schema().check(options).is_ok()
    }

    fn cache(&self) -> CacheHandle {
        self.cache.get()
    }

    fn set_cache(&self, cache: CacheHandle) {
        self.cache.replace(cache);
    }

    fn cache_swap_lock(&self) -> &tokio::sync::Mutex<()> {
        self.cache.swap_lock()
    }

    async fn analytics_data(&self, _options: &DriverOptions) -> DriverResult<AnalyticsDataSet> {
        Ok(AnalyticsDataSet::empty())
    }

    fn embed_code(&self, _options: &DriverOptions) -> DriverResult<String> {
        Ok(String::new())
    }
}
