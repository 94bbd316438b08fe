//! Capability contract every analytics driver satisfies.

use super::CacheHandle;
use crate::analytics::domain::{AnalyticsDataSet, DriverOptions, OptionsSchema};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// An analytics provider integration.
///
/// Drivers are shared behind `Arc` and swap their cache through interior
/// mutability, so every method takes `&self`.
#[async_trait]
pub trait AnalyticsDriver: Send + Sync {
    /// Human-readable driver name.
    fn label(&self) -> String;

    /// Static setup guidance as HTML, independent of any options.
    fn installation_instructions(&self) -> String;

    /// Declares the options this driver needs.
    fn options_schema(&self) -> OptionsSchema;

    /// Builds a fresh options value holding only schema defaults.
    fn empty_options(&self) -> DriverOptions {
        self.options_schema().empty_options()
    }

    /// Confirms the options are usable, possibly contacting the provider.
    ///
    /// Expected failures (bad credentials, unreachable provider) yield
    /// `false` rather than an error.
    async fn validate(&self, options: &DriverOptions) -> bool;

    /// Returns the cache currently used for analytics lookups.
    fn cache(&self) -> CacheHandle;

    /// Replaces the cache used for analytics lookups.
    fn set_cache(&self, cache: CacheHandle);

    /// Returns the lock held while the cache is temporarily replaced.
    fn cache_swap_lock(&self) -> &tokio::sync::Mutex<()>;

    /// Fetches analytics data, consulting the current cache.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] when the options are unusable or the
    /// provider request fails.
    async fn analytics_data(&self, options: &DriverOptions) -> DriverResult<AnalyticsDataSet>;

    /// Renders an embeddable snippet for the configured property.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] when required options are missing or the
    /// snippet cannot be rendered.
    fn embed_code(&self, options: &DriverOptions) -> DriverResult<String>;
}

/// Errors returned by driver implementations.
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// A required option has no usable value.
    #[error("option '{0}' is missing or invalid")]
    MissingOption(String),

    /// The embed snippet template failed to render.
    #[error("embed code rendering failed: {0}")]
    Template(String),

    /// The upstream analytics provider failed.
    #[error("analytics provider error: {0}")]
    Upstream(Arc<dyn std::error::Error + Send + Sync>),
}

impl DriverError {
    /// Wraps an upstream provider error.
    pub fn upstream(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upstream(Arc::new(err))
    }
}
