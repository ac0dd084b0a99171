//! Update loop phase and viewport state.

/// Phase of the update loop.
///
/// Every event handler moves from `Idle` into one of the working phases and
/// back to `Idle`, except a quit which ends in `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Sampling,
    Resizing,
    Scrolling,
    Terminated,
}

/// Terminal size and scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub width: u16,
    pub height: u16,
    /// Index of the first visible row.
    pub scroll: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            width: 80,
            height: 20,
            scroll: 0,
        }
    }
}

impl ViewportState {
    /// Lines taken by the header and footer bars.
    pub const CHROME_LINES: u16 = 2;

    /// Lines available for port rows.
    pub fn content_height(&self) -> usize {
        self.height.saturating_sub(Self::CHROME_LINES) as usize
    }

    /// Largest scroll offset that still shows the last row.
    pub fn max_scroll(&self, rows: usize) -> usize {
        rows.saturating_sub(self.content_height().max(1))
    }

    /// Applies a new terminal size and keeps the offset in range.
    pub fn resize(&mut self, width: u16, height: u16, rows: usize) {
        self.width = width;
        self.height = height;
        self.clamp(rows);
    }

    /// Moves the offset by `delta` rows within `[0, max_scroll]`.
    pub fn scroll_by(&mut self, delta: isize, rows: usize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp(rows);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self, rows: usize) {
        self.scroll = self.max_scroll(rows);
    }

    /// One page of rows (at least one).
    pub fn page(&self) -> usize {
        self.content_height().max(1)
    }

    pub fn clamp(&mut self, rows: usize) {
        self.scroll = self.scroll.min(self.max_scroll(rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_initial_terminal() {
        let vp = ViewportState::default();
        assert_eq!((vp.width, vp.height, vp.scroll), (80, 20, 0));
        assert_eq!(vp.content_height(), 18);
    }

    #[test]
    fn scroll_stays_within_rows() {
        let mut vp = ViewportState {
            width: 80,
            height: 7,
            scroll: 0,
        };
        // 5 visible rows, 12 rows total.
        vp.scroll_by(-3, 12);
        assert_eq!(vp.scroll, 0);
        vp.scroll_by(100, 12);
        assert_eq!(vp.scroll, 7);
        vp.scroll_by(-2, 12);
        assert_eq!(vp.scroll, 5);
        vp.scroll_to_bottom(12);
        assert_eq!(vp.scroll, 7);
        vp.scroll_to_top();
        assert_eq!(vp.scroll, 0);
    }

    #[test]
    fn no_scroll_when_everything_fits() {
        let mut vp = ViewportState::default();
        vp.scroll_by(1, 3);
        assert_eq!(vp.scroll, 0);
        assert_eq!(vp.max_scroll(3), 0);
    }

    #[test]
    fn growing_terminal_pulls_offset_back() {
        let mut vp = ViewportState {
            width: 80,
            height: 4,
            scroll: 0,
        };
        vp.scroll_to_bottom(10);
        assert_eq!(vp.scroll, 8);
        vp.resize(120, 40, 10);
        assert_eq!(vp.scroll, 0);
        assert_eq!(vp.width, 120);
    }

    #[test]
    fn tiny_terminal_still_reaches_last_row() {
        let mut vp = ViewportState {
            width: 10,
            height: 1,
            scroll: 0,
        };
        vp.scroll_to_bottom(4);
        assert_eq!(vp.scroll, 3);
        assert_eq!(vp.page(), 1);
    }
}
