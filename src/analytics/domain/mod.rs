//! Domain model for analytics driver configuration.
//!
//! The domain covers driver names, driver-shaped options and the schemas
//! that declare them, the persisted configuration entity, and the widget
//! data drivers hand to the presentation layer. Infrastructure concerns
//! are kept outside the domain boundary.

mod configuration;
mod data_set;
mod error;
mod ids;
mod name;
mod options;
mod permission;
mod schema;

pub use configuration::{DriverConfiguration, PersistedConfigurationData, resolve_starting_options};
pub use data_set::{AnalyticsDataSet, AnalyticsWidget, DataPoint, WidgetKind};
pub use error::{AnalyticsDomainError, OptionsSchemaError};
pub use ids::ConfigurationId;
pub use name::DriverName;
pub use options::{DriverOptions, FileReference, OptionValue, SchemaTag};
pub use permission::Permission;
pub use schema::{OptionField, OptionKind, OptionsSchema};
