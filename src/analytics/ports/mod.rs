//! Port contracts for analytics driver configuration.
//!
//! Ports define infrastructure-agnostic interfaces for drivers, their
//! caches, configuration persistence, and the host application's
//! authorization, presentation, and file-storage collaborators.

pub mod authorization;
pub mod cache;
pub mod driver;
pub mod file_storage;
pub mod reporting;
pub mod repository;
pub mod widgets;

pub use authorization::Authorizer;
pub use cache::{AnalyticsCache, CacheError, CacheHandle, CacheResult};
pub use driver::{AnalyticsDriver, DriverError, DriverResult};
pub use file_storage::{FileStorage, FileStorageError, FileStorageResult};
pub use reporting::{
    ReportDimension, ReportQuery, ReportingApi, ReportingApiError, ReportingApiResult,
    ServiceAccountCredentials,
};
pub use repository::{
    ConfigurationRepositoryError, ConfigurationRepositoryResult, DriverConfigurationRepository,
};
pub use widgets::WidgetRegistrar;
