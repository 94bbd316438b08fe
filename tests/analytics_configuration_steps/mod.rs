//! Step definitions for analytics configuration scenarios.

pub mod world;

mod given;
mod then;
mod when;
