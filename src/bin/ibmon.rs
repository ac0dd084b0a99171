//! ibmon - live InfiniBand port throughput monitor.
//!
//! Usage:
//!   ibmon                        # full-screen view, 1 second interval
//!   ibmon -i 500ms               # faster refresh
//!   ibmon --ignore mlx5_2,mlx5_0:2
//!   ibmon --stream | tee ib.log  # one line per tick, no terminal control

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use ibmon::collector::{DEFAULT_SYSFS_ROOT, RealFs};
use ibmon::config::{Config, IgnoreSet, PollInterval, Surface};
use ibmon::monitor::Monitor;
use ibmon::stream;
use ibmon::tui::App;

/// Live InfiniBand port throughput monitor.
#[derive(Parser)]
#[command(name = "ibmon", about = "Live InfiniBand port throughput monitor", version)]
struct Args {
    /// Sampling interval (e.g. "1", "1s", "500ms").
    #[arg(short, long, default_value = "1s")]
    interval: PollInterval,

    /// Comma-separated adaptors or adaptor:port pairs to skip.
    #[arg(long, value_name = "LIST", default_value = "")]
    ignore: String,

    /// Root of the InfiniBand sysfs class (for testing/mocking).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SYSFS_ROOT)]
    sysfs_root: PathBuf,

    /// Print one line per tick instead of the full-screen view.
    #[arg(long)]
    stream: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file. Without it the full-screen view discards logs.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            interval: self.interval,
            ignore: IgnoreSet::parse(&self.ignore),
            sysfs_root: self.sysfs_root.clone(),
            surface: if self.stream {
                Surface::Stream
            } else {
                Surface::FullScreen
            },
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr in stream mode. The full-screen view owns the terminal,
/// so there they go to `log_file` or nowhere.
fn init_logging(
    verbose: u8,
    quiet: bool,
    surface: Surface,
    log_file: Option<&PathBuf>,
) -> io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("ibmon={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let (writer, ansi) = match (log_file, surface) {
        (Some(path), _) => (BoxMakeWriter::new(Mutex::new(File::create(path)?)), false),
        (None, Surface::Stream) => (BoxMakeWriter::new(io::stderr), true),
        (None, Surface::FullScreen) => (BoxMakeWriter::new(io::sink), false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();
    let config = args.config();

    if let Err(e) = init_logging(
        args.verbose,
        args.quiet,
        config.surface,
        args.log_file.as_ref(),
    ) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    info!(
        root = %config.sysfs_root.display(),
        interval = ?config.interval.duration(),
        ignored = config.ignore.len(),
        "starting"
    );

    let mut monitor = match Monitor::discover(
        RealFs::new(),
        &config.sysfs_root,
        &config.ignore,
        config.interval,
    ) {
        Ok(m) => m,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match config.surface {
        Surface::FullScreen => App::new(monitor).run(),
        Surface::Stream => {
            let running = Arc::new(AtomicBool::new(true));
            let r = running.clone();
            if let Err(e) = ctrlc::set_handler(move || {
                r.store(false, Ordering::SeqCst);
            }) {
                warn!("Failed to set Ctrl-C handler: {}", e);
            }
            stream::run(&mut monitor, &running, io::stdout().lock())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
