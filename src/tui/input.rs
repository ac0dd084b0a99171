//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::ViewportState;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// The viewport offset was updated.
    Scrolled,
}

/// Viewport movement requested by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Handles key input; `rows` is the number of port rows being displayed.
pub fn handle_key(viewport: &mut ViewportState, rows: usize, key: KeyEvent) -> KeyAction {
    // Some terminals report releases and repeats too.
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    let nav = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,

        KeyCode::Up | KeyCode::Char('k') => NavAction::Up,
        KeyCode::Down | KeyCode::Char('j') => NavAction::Down,
        KeyCode::PageUp => NavAction::PageUp,
        KeyCode::PageDown => NavAction::PageDown,
        KeyCode::Home | KeyCode::Char('g') => NavAction::Top,
        KeyCode::End | KeyCode::Char('G') => NavAction::Bottom,

        _ => return KeyAction::None,
    };

    apply_nav(viewport, rows, nav);
    KeyAction::Scrolled
}

fn apply_nav(viewport: &mut ViewportState, rows: usize, nav: NavAction) {
    let page = viewport.page() as isize;
    match nav {
        NavAction::Up => viewport.scroll_by(-1, rows),
        NavAction::Down => viewport.scroll_by(1, rows),
        NavAction::PageUp => viewport.scroll_by(-page, rows),
        NavAction::PageDown => viewport.scroll_by(page, rows),
        NavAction::Top => viewport.scroll_to_top(),
        NavAction::Bottom => viewport.scroll_to_bottom(rows),
    }
}
