//! ibmon - live InfiniBand port throughput monitor.
//!
//! This library provides the pieces used by the `ibmon` binary:
//! - sysfs discovery and counter reads (`collector`)
//! - rate parsing, throughput sampling and row layout (`collector::sysfs::parser`,
//!   `rates`, `layout`)
//! - the full-screen (`tui`) and line-oriented (`stream`) surfaces

pub mod collector;
pub mod config;
pub mod fmt;
pub mod layout;
pub mod model;
pub mod monitor;
pub mod rates;
pub mod stream;
pub mod tui;
pub mod util;
