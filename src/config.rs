//! Runtime configuration: polling interval, ignore list, surface selection.

use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::collector::sysfs::DEFAULT_SYSFS_ROOT;
use crate::model::PortId;
use crate::util::{DurationParseError, parse_seconds};

/// Error type for invalid configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The interval string could not be parsed.
    InvalidInterval(DurationParseError),
    /// The interval parsed to zero or a negative value.
    NonPositiveInterval(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidInterval(e) => write!(f, "invalid interval: {}", e),
            ConfigError::NonPositiveInterval(input) => {
                write!(f, "interval must be greater than zero, got '{}'", input)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<DurationParseError> for ConfigError {
    fn from(e: DurationParseError) -> Self {
        ConfigError::InvalidInterval(e)
    }
}

/// Polling interval, guaranteed strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollInterval(Duration);

impl PollInterval {
    pub const DEFAULT: PollInterval = PollInterval(Duration::from_secs(1));

    /// Wraps a duration, rejecting zero.
    pub fn new(duration: Duration) -> Result<Self, ConfigError> {
        if duration.is_zero() {
            return Err(ConfigError::NonPositiveInterval(format!("{:?}", duration)));
        }
        Ok(Self(duration))
    }

    pub fn duration(self) -> Duration {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for PollInterval {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secs = parse_seconds(s)?;
        if secs <= 0.0 {
            return Err(ConfigError::NonPositiveInterval(s.trim().to_string()));
        }
        let duration = Duration::try_from_secs_f64(secs).map_err(|e| {
            ConfigError::InvalidInterval(DurationParseError {
                input: s.trim().to_string(),
                message: e.to_string(),
            })
        })?;
        // Sub-nanosecond values round to zero.
        Self::new(duration).map_err(|_| ConfigError::NonPositiveInterval(s.trim().to_string()))
    }
}

/// Adaptors (`mlx5_0`) and single ports (`mlx5_0:1`) to leave out of discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    entries: HashSet<String>,
}

impl IgnoreSet {
    /// Parses a comma-separated list. Items are trimmed, empty items dropped.
    pub fn parse(list: &str) -> Self {
        let entries = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the whole adaptor is ignored.
    pub fn is_adaptor_ignored(&self, adaptor: &str) -> bool {
        self.entries.contains(adaptor)
    }

    /// True if the port or its adaptor is ignored.
    pub fn is_port_ignored(&self, id: &PortId) -> bool {
        self.is_adaptor_ignored(&id.adaptor) || self.entries.contains(&id.to_string())
    }
}

/// Which output surface to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// Full-screen, resizable, scrollable view.
    #[default]
    FullScreen,
    /// Append-only lines on stdout.
    Stream,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub interval: PollInterval,
    pub ignore: IgnoreSet,
    pub sysfs_root: PathBuf,
    pub surface: Surface,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: PollInterval::default(),
            ignore: IgnoreSet::default(),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            surface: Surface::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_parses_units() {
        let i: PollInterval = "500ms".parse().unwrap();
        assert_eq!(i.duration(), Duration::from_millis(500));
        let i: PollInterval = "2".parse().unwrap();
        assert_eq!(i.as_secs_f64(), 2.0);
        assert_eq!(PollInterval::default().duration(), Duration::from_secs(1));
    }

    #[test]
    fn interval_rejects_zero_and_negative() {
        for input in ["0", "0s", "-1s", "-250ms"] {
            assert!(
                matches!(
                    input.parse::<PollInterval>(),
                    Err(ConfigError::NonPositiveInterval(_))
                ),
                "{input} should be rejected"
            );
        }
        assert!(PollInterval::new(Duration::ZERO).is_err());
    }

    #[test]
    fn interval_rejects_garbage() {
        assert!(matches!(
            "often".parse::<PollInterval>(),
            Err(ConfigError::InvalidInterval(_))
        ));
    }

    #[test]
    fn ignore_set_matches_adaptor_or_port() {
        let ignore = IgnoreSet::parse(" mlx5_0 ,mlx5_1:2,,");
        assert_eq!(ignore.len(), 2);

        assert!(ignore.is_adaptor_ignored("mlx5_0"));
        assert!(ignore.is_port_ignored(&PortId::new("mlx5_0", "1")));
        assert!(ignore.is_port_ignored(&PortId::new("mlx5_1", "2")));
        assert!(!ignore.is_port_ignored(&PortId::new("mlx5_1", "1")));
        assert!(!ignore.is_adaptor_ignored("mlx5_1"));
    }

    #[test]
    fn empty_ignore_list() {
        assert!(IgnoreSet::parse("").is_empty());
        assert!(IgnoreSet::parse(" , ").is_empty());
    }
}
