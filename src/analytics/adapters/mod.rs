//! Adapters for analytics driver configuration.
//!
//! # Available Adapters
//!
//! - [`drivers`]: built-in [`AnalyticsDriver`] implementations
//! - [`cache`]: in-memory cache and the write-only refresh decorator
//! - [`memory`]: in-memory repository and host collaborators for tests and
//!   embedding
//! - [`postgres`]: `PostgreSQL` persistence using Diesel ORM
//! - [`storage`]: content-addressed file storage for uploaded option files
//! - [`record`]: the persisted row shape shared by the repositories
//!
//! [`AnalyticsDriver`]: crate::analytics::ports::AnalyticsDriver

pub mod cache;
pub mod drivers;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod storage;
