//! Service layer for analytics driver configuration.
//!
//! Services coordinate the driver registry, configuration persistence,
//! driver validation, and the cache-isolated refresh action.

mod cache_scope;
mod config;
mod configuration;
mod refresh;
mod registry;

pub use cache_scope::with_temporary_cache;
pub use config::{AnalyticsModuleConfig, DEFAULT_VALIDATION_FAILURE_KEY, DEFAULT_VALIDATION_TIMEOUT};
pub use configuration::{
    AnalyticsConfigService, AnalyticsConfigServiceError, AnalyticsConfigServiceResult,
    ConfigurationDraft, ConfigurationSummary, OptionsForm,
};
pub use refresh::{RefreshFailure, RefreshReport, refresh_configurations};
pub use registry::{ConfiguredDriverError, DriverLoader, DriverRegistry, DriverRegistryError};
