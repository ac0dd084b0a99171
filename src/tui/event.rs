//! Event handling for the TUI.
//!
//! Two threads feed one channel: a ticker that fires on fixed deadlines, so a
//! slow frame does not push later samples back or drop them, and an input
//! poller that forwards key presses and resizes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

use crate::util::TickSchedule;

/// How long the input thread blocks in one poll before rechecking the stop flag.
const INPUT_POLL: Duration = Duration::from_millis(250);

/// Longest single sleep of the ticker between stop-flag checks.
const STOP_CHECK: Duration = Duration::from_millis(100);

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Sampling deadline reached.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
}

/// Merges timer ticks and terminal input into one stream.
pub struct EventHandler {
    rx: Receiver<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Starts the ticker and input threads.
    pub fn new(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        spawn_ticker(tx.clone(), tick_interval, Arc::clone(&stop));
        spawn_input(tx, Arc::clone(&stop));

        Self { rx, stop }
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn spawn_ticker(tx: Sender<Event>, interval: Duration, stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        let mut schedule = TickSchedule::new(Instant::now(), interval);
        while !stop.load(Ordering::Relaxed) {
            match schedule.remaining(Instant::now()) {
                Some(wait) if wait.is_zero() => {
                    if tx.send(Event::Tick).is_err() {
                        break;
                    }
                    schedule.advance();
                }
                Some(wait) => thread::sleep(wait.min(STOP_CHECK)),
                None => thread::sleep(STOP_CHECK),
            }
        }
    });
}

fn spawn_input(tx: Sender<Event>, stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                // No terminal attached.
                Err(_) => {
                    thread::sleep(INPUT_POLL);
                    continue;
                }
            }
            let Ok(evt) = event::read() else {
                continue;
            };
            let event = match evt {
                CrosstermEvent::Key(key) => Event::Key(key),
                CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                _ => continue,
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}
