//! Utility modules for ibmon.

mod duration;
mod schedule;

pub use duration::{DurationParseError, parse_seconds};
pub use schedule::TickSchedule;
