//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Highlight colors
    pub const HIGHLIGHT_MODIFIED: Color = Color::Yellow;

    // Direction colors
    pub const RX_COLOR: Color = Color::Cyan;
    pub const TX_COLOR: Color = Color::Magenta;

    // Bar gradient endpoints (RGB)
    pub const GRADIENT_START: (u8, u8, u8) = (0x5A, 0x56, 0xE0);
    pub const GRADIENT_END: (u8, u8, u8) = (0xEE, 0x6F, 0xF8);
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Port id + capability prefix of a row.
    pub fn row_header() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Modified item style (yellow).
    pub fn modified_item() -> Style {
        Style::default().fg(Theme::HIGHLIGHT_MODIFIED)
    }

    /// Receive arrow.
    pub fn rx() -> Style {
        Style::default().fg(Theme::RX_COLOR)
    }

    /// Transmit arrow.
    pub fn tx() -> Style {
        Style::default().fg(Theme::TX_COLOR)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in the footer).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }
}
