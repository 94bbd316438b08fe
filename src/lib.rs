//! Analytics driver configuration core.
//!
//! This crate lets an installation pick an analytics driver, configure it
//! through the driver's own options schema, persist the selection, and
//! read analytics data and embed codes back through the configured
//! driver.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`analytics`]: Driver registry, configuration persistence, and refresh

pub mod analytics;
