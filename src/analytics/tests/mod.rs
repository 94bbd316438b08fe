//! Unit tests for the analytics configuration module.
//!
//! Tests are organised by layer: domain values, the persisted row codec,
//! the driver registry, the built-in drivers, and service orchestration.
