//! Append-only line output for non-interactive use (pipes, logs).
//!
//! ```text
//! TIME      mlx5_0:1 (400 G (4X NDR))  mlx5_1:1 (100 G (4X EDR))
//! --------  -------------------------  -------------------------
//! 12:00:01                 168.0/48.0                   0.0/0.0
//! ```

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use tracing::info;

use crate::collector::FileSystem;
use crate::fmt::{FmtStyle, format_gbps};
use crate::model::{InterfaceState, SampleOutcome};
use crate::monitor::Monitor;
use crate::util::TickSchedule;

const TIME_HEADER: &str = "TIME";
const TIME_WIDTH: usize = 8;
const COLUMN_SEP: &str = "  ";
const MIN_COLUMN_WIDTH: usize = 11;

/// Shutdown is checked at least this often while waiting for the next tick.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Column widths fixed from the port set at startup.
pub struct StreamView {
    widths: Vec<usize>,
}

impl StreamView {
    pub fn new(interfaces: &[InterfaceState]) -> Self {
        let widths = interfaces
            .iter()
            .map(|s| column_label(s).chars().count().max(MIN_COLUMN_WIDTH))
            .collect();
        Self { widths }
    }

    /// Writes the column titles and the separator line.
    pub fn write_header<W: Write>(&self, out: &mut W, interfaces: &[InterfaceState]) -> io::Result<()> {
        let mut titles = format!("{:<w$}", TIME_HEADER, w = TIME_WIDTH);
        let mut dashes = "-".repeat(TIME_WIDTH);
        for (state, &width) in interfaces.iter().zip(&self.widths) {
            titles.push_str(COLUMN_SEP);
            titles.push_str(&format!("{:<width$}", column_label(state)));
            dashes.push_str(COLUMN_SEP);
            dashes.push_str(&"-".repeat(width));
        }
        writeln!(out, "{}", titles.trim_end())?;
        writeln!(out, "{}", dashes)
    }

    /// Writes one line of `rx/tx` rates stamped with `time`.
    pub fn write_sample<W: Write>(
        &self,
        out: &mut W,
        time: &str,
        interfaces: &[InterfaceState],
    ) -> io::Result<()> {
        let mut line = format!("{:<w$}", time, w = TIME_WIDTH);
        for (state, &width) in interfaces.iter().zip(&self.widths) {
            line.push_str(COLUMN_SEP);
            line.push_str(&format!("{:>width$}", cell(state)));
        }
        writeln!(out, "{}", line)
    }
}

/// Samples until `running` is cleared, writing one line per tick.
pub fn run<F: FileSystem, W: Write>(
    monitor: &mut Monitor<F>,
    running: &AtomicBool,
    mut out: W,
) -> io::Result<()> {
    let view = StreamView::new(monitor.interfaces());
    view.write_header(&mut out, monitor.interfaces())?;
    out.flush()?;

    let mut schedule = TickSchedule::new(Instant::now(), monitor.interval().duration());

    while running.load(Ordering::SeqCst) {
        match schedule.remaining(Instant::now()) {
            Some(wait) if wait.is_zero() => {}
            Some(wait) => {
                thread::sleep(wait.min(SLEEP_SLICE));
                continue;
            }
            None => {
                thread::sleep(SLEEP_SLICE);
                continue;
            }
        }

        monitor.tick();
        let time = Local::now().format("%H:%M:%S").to_string();
        view.write_sample(&mut out, &time, monitor.interfaces())?;
        out.flush()?;
        schedule.advance();
    }

    info!("stream stopped");
    Ok(())
}

fn column_label(state: &InterfaceState) -> String {
    format!("{} ({})", state.id(), state.descriptor().label(FmtStyle::Compact))
}

fn cell(state: &InterfaceState) -> String {
    match state.outcome() {
        SampleOutcome::CounterReset => "reset".to_string(),
        SampleOutcome::Pending | SampleOutcome::Fresh => format!(
            "{}/{}",
            format_gbps(state.rx_rate(), FmtStyle::Compact),
            format_gbps(state.tx_rate(), FmtStyle::Compact)
        ),
    }
}
