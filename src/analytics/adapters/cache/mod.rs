//! Cache adapters for analytics drivers.

mod memory;
mod write_only;

pub use memory::InMemoryAnalyticsCache;
pub use write_only::WriteOnlyCache;
