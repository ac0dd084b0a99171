//! Full-screen terminal view.
//!
//! One row per port with receive and transmit utilization bars. The row set
//! is fixed at startup; the view reflows on resize and scrolls when there are
//! more ports than lines.

mod app;
mod event;
mod input;
mod render;
mod state;
pub mod style;

pub use app::App;
pub use event::Event;
pub use state::{Phase, ViewportState};
