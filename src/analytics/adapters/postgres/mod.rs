//! `PostgreSQL` adapters for analytics driver configuration persistence.

mod models;
mod repository;
mod schema;

pub use repository::{AnalyticsPgPool, PostgresDriverConfigurationRepository};
