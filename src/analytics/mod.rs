//! Pluggable analytics driver configuration.
//!
//! An installation selects one analytics driver, fills in that driver's
//! own options form, and persists the result. The configured driver then
//! supplies dashboard widgets and an embed snippet. A manual refresh
//! recomputes every driver's data while keeping its cache warm.
//!
//! # Architecture
//!
//! - **Domain**: driver names, typed options and their schemas, the
//!   configuration entity ([`domain::DriverConfiguration`])
//! - **Ports**: drivers, caches, persistence, and host collaborators
//!   ([`ports::AnalyticsDriver`], [`ports::DriverConfigurationRepository`])
//! - **Adapters**: built-in drivers, caches, in-memory and `PostgreSQL`
//!   repositories, file storage
//! - **Services**: the driver registry and the configuration orchestrator
//!   ([`services::DriverRegistry`], [`services::AnalyticsConfigService`])
//!
//! # Example
//!
//! ```
//! use analytics_config::analytics::adapters::drivers::{NULL_DRIVER_NAME, NullDriver};
//! use analytics_config::analytics::domain::DriverName;
//! use analytics_config::analytics::ports::AnalyticsDriver;
//! use analytics_config::analytics::services::DriverRegistry;
//! use std::sync::Arc;
//!
//! let mut registry = DriverRegistry::new();
//! let name = DriverName::new(NULL_DRIVER_NAME).expect("valid driver name");
//! registry
//!     .register(name, || -> Arc<dyn AnalyticsDriver> { Arc::new(NullDriver::new()) })
//!     .expect("registration should succeed");
//!
//! let driver = registry.load("null").expect("driver should resolve");
//! assert_eq!(driver.label(), "None");
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
