//! InfiniBand sysfs access: port discovery and counter/capability reads.
//!
//! Layout under the discovery root (usually `/sys/class/infiniband`):
//!
//! ```text
//! <adaptor>/                  symlink into the device tree
//!   ports/<n>/counters/port_rcv_data
//!   ports/<n>/counters/port_xmit_data
//!   ports/<n>/rate            "400 Gb/sec (4X NDR)"
//! ```

mod discovery;
mod parser;

pub use discovery::{DEFAULT_SYSFS_ROOT, discover_interfaces};
pub use parser::{RateParseError, compact_label, parse_capability};

use std::path::Path;

use crate::collector::traits::FileSystem;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading sysfs files.
    Io(std::io::Error),
    /// Parse error in sysfs files.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// Reads a monotonic counter file.
pub fn read_counter<F: FileSystem>(fs: &F, path: &Path) -> Result<i64, CollectError> {
    let content = fs.read_to_string(path)?;
    let trimmed = content.trim();
    trimmed
        .parse::<i64>()
        .map_err(|e| CollectError::Parse(format!("{}: {:?}: {}", path.display(), trimmed, e)))
}

/// Reads a capability file, trimmed of surrounding whitespace.
pub fn read_rate<F: FileSystem>(fs: &F, path: &Path) -> Result<String, CollectError> {
    Ok(fs.read_to_string(path)?.trim().to_string())
}
