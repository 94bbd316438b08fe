//! In-memory adapters for analytics configuration.

mod authorization;
mod configuration_repository;
mod reporting;
mod widgets;

pub use authorization::StaticAuthorizer;
pub use configuration_repository::InMemoryDriverConfigurationRepository;
pub use reporting::InMemoryReportingApi;
pub use widgets::CollectingWidgetRegistrar;
