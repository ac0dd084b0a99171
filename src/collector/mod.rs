//! InfiniBand counter collection.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   sysfs                      │
//! │  discover_interfaces  read_counter  read_rate│
//! │  parse_capability                            │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!                 ┌──────▼──────┐
//!                 │  FileSystem │ (trait)
//!                 └──────┬──────┘
//!              ┌─────────┴─────────┐
//!       ┌──────▼──────┐     ┌──────▼──────┐
//!       │   RealFs    │     │   MockFs    │
//!       │  (Linux)    │     │ (Scenarios) │
//!       └─────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use ibmon::collector::{MockFs, discover_interfaces};
//! use ibmon::collector::mock::SCENARIO_ROOT;
//! use ibmon::config::IgnoreSet;
//!
//! let fs = MockFs::infiniband_host();
//! let ports = discover_interfaces(&fs, SCENARIO_ROOT, &IgnoreSet::default()).unwrap();
//! assert_eq!(ports.len(), 3);
//! ```

pub mod mock;
pub mod sysfs;
pub mod traits;

pub use mock::MockFs;
pub use sysfs::{CollectError, DEFAULT_SYSFS_ROOT, discover_interfaces, read_counter, read_rate};
pub use traits::{FileSystem, RealFs};
