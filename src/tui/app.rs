//! Main TUI application.

use std::io;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::collector::FileSystem;
use crate::monitor::Monitor;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{Phase, ViewportState};

/// Main TUI application.
///
/// Sole owner of the monitor and viewport; every mutation happens on the
/// thread that calls [`App::run`].
pub struct App<F: FileSystem> {
    monitor: Monitor<F>,
    viewport: ViewportState,
    phase: Phase,
}

impl<F: FileSystem> App<F> {
    pub fn new(monitor: Monitor<F>) -> Self {
        Self {
            monitor,
            viewport: ViewportState::default(),
            phase: Phase::Idle,
        }
    }

    /// Runs the TUI until a quit key is pressed.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let events = EventHandler::new(self.monitor.interval().duration());

        if let Ok(size) = terminal.size() {
            self.handle_event(Event::Resize(size.width, size.height));
        }

        loop {
            terminal.draw(|frame| {
                render(
                    frame,
                    self.monitor.interfaces(),
                    &self.viewport,
                    self.monitor.interval(),
                )
            })?;

            let event = match events.next() {
                Ok(event) => event,
                Err(_) => break,
            };
            if self.handle_event(event) == Phase::Terminated {
                break;
            }
        }
        Ok(())
    }

    /// Applies one event and returns the phase the loop ends up in.
    pub fn handle_event(&mut self, event: Event) -> Phase {
        match event {
            Event::Tick => {
                self.phase = Phase::Sampling;
                self.monitor.tick();
                self.viewport.clamp(self.rows());
                self.phase = Phase::Idle;
            }
            Event::Resize(width, height) => {
                self.phase = Phase::Resizing;
                debug!(width, height, "terminal resized");
                let rows = self.rows();
                self.viewport.resize(width, height, rows);
                self.phase = Phase::Idle;
            }
            Event::Key(key) => {
                self.phase = Phase::Scrolling;
                let rows = self.rows();
                self.phase = match handle_key(&mut self.viewport, rows, key) {
                    KeyAction::Quit => Phase::Terminated,
                    KeyAction::Scrolled | KeyAction::None => Phase::Idle,
                };
            }
        }
        self.phase
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn monitor(&self) -> &Monitor<F> {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut Monitor<F> {
        &mut self.monitor
    }

    fn rows(&self) -> usize {
        self.monitor.interfaces().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{MockFs, SCENARIO_ROOT};
    use crate::config::{IgnoreSet, PollInterval};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn app() -> App<MockFs> {
        let monitor = Monitor::discover(
            MockFs::infiniband_host(),
            SCENARIO_ROOT,
            &IgnoreSet::default(),
            PollInterval::DEFAULT,
        )
        .unwrap();
        App::new(monitor)
    }

    #[test]
    fn tick_samples_and_returns_to_idle() {
        let mut app = app();
        app.monitor_mut()
            .fs_mut()
            .set_counters(SCENARIO_ROOT, "mlx5_0", "1", 25_000_000_000, 0);

        assert_eq!(app.handle_event(Event::Tick), Phase::Idle);
        assert_eq!(app.monitor().interfaces()[0].rx_rate(), 200.0);
        assert_eq!(app.monitor().interfaces()[0].rx_utilization(), 0.5);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut app = app();
        assert_eq!(app.viewport().width, 80);

        assert_eq!(app.handle_event(Event::Resize(20, 3)), Phase::Idle);
        assert_eq!(app.viewport().width, 20);
        assert_eq!(app.viewport().content_height(), 1);
    }

    #[test]
    fn scrolling_is_bounded_by_row_count() {
        let mut app = app();
        app.handle_event(Event::Resize(120, 4));

        for _ in 0..10 {
            assert_eq!(app.handle_event(key(KeyCode::Down)), Phase::Idle);
        }
        assert_eq!(app.viewport().scroll, 1);

        app.handle_event(Event::Resize(120, 40));
        assert_eq!(app.viewport().scroll, 0);
    }

    #[test]
    fn quit_terminates() {
        let mut app = app();
        assert_eq!(app.handle_event(key(KeyCode::Char('q'))), Phase::Terminated);
        assert_eq!(app.phase(), Phase::Terminated);
    }
}
