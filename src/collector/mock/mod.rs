//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built scenarios for testing
//! discovery and sampling without a real InfiniBand sysfs tree.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
pub use scenarios::SCENARIO_ROOT;
