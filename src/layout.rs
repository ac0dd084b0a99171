//! Row layout for the full-screen view.
//!
//! A row is:
//!
//! ```text
//! mlx5_0:1   (400 Gbps (4X NDR)): ↓ ██████░░░░  42% 00168.0 Gbps   ↑ ██░░░░░░░░  12% 00048.0 Gbps
//! └──────────── header ─────────┘   └─ bar ──┘                         └─ bar ──┘
//! ```
//!
//! Everything except the two bars has a fixed width, so the bar budget is
//! whatever the terminal has left after the header and that overhead.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::fmt::{FmtStyle, PCT_FIELD_WIDTH, RATE_FIELD_WIDTH, format_gbps, format_pct};
use crate::model::{InterfaceState, PortId, SampleOutcome};
use crate::tui::style::{Styles, Theme};

/// Bars never shrink below this, even if the row then overflows.
pub const MIN_BAR_WIDTH: usize = 10;

/// Port identifiers are padded to this width in the header.
pub const HEADER_ID_WIDTH: usize = 10;

const RX_ARROW: &str = "↓ ";
const RX_ARROW_WIDTH: usize = 2;
const TX_ARROW: &str = "   ↑ ";
const TX_ARROW_WIDTH: usize = 5;
const FIELD_SEP: &str = " ";

/// Columns used by everything except the header and the two bars.
pub const NON_BAR_OVERHEAD: usize = RX_ARROW_WIDTH
    + TX_ARROW_WIDTH
    + 2 * (2 * FIELD_SEP.len() + PCT_FIELD_WIDTH + RATE_FIELD_WIDTH);

const FILLED: char = '█';
const EMPTY: char = '░';

/// Width budget of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub header_width: usize,
    /// Width of each of the two bars.
    pub bar_width: usize,
    /// True when `bar_width` was raised to [`MIN_BAR_WIDTH`].
    pub floor_engaged: bool,
}

impl RowLayout {
    /// Splits what is left of `terminal_width` evenly between the two bars.
    pub fn compute(terminal_width: usize, header_width: usize) -> Self {
        let available = terminal_width.saturating_sub(header_width + NON_BAR_OVERHEAD);
        let half = available / 2;
        Self {
            header_width,
            bar_width: half.max(MIN_BAR_WIDTH),
            floor_engaged: half < MIN_BAR_WIDTH,
        }
    }

    /// Total columns the row occupies.
    pub fn total_width(&self) -> usize {
        self.header_width + NON_BAR_OVERHEAD + 2 * self.bar_width
    }
}

/// Values shown in one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowValues {
    pub rx_pct: f64,
    pub rx_gbps: f64,
    pub tx_pct: f64,
    pub tx_gbps: f64,
    pub reset: bool,
}

impl RowValues {
    pub fn from_state(state: &InterfaceState) -> Self {
        Self {
            rx_pct: state.rx_utilization(),
            rx_gbps: state.rx_rate(),
            tx_pct: state.tx_utilization(),
            tx_gbps: state.tx_rate(),
            reset: state.outcome() == SampleOutcome::CounterReset,
        }
    }
}

/// Header text: padded port id followed by the capability label.
pub fn header_text(id: &PortId, label: &str) -> String {
    format!("{:<width$} ({}): ", id.to_string(), label, width = HEADER_ID_WIDTH)
}

/// Renders one row within `terminal_width` columns (or wider when the bar floor is engaged).
pub fn render_row(header: &str, values: &RowValues, terminal_width: usize) -> Line<'static> {
    let header_span = Span::styled(header.to_string(), Styles::row_header());
    let layout = RowLayout::compute(terminal_width, header_span.width());

    let mut spans = Vec::with_capacity(16);
    spans.push(header_span);
    spans.push(Span::styled(RX_ARROW, Styles::rx()));
    spans.extend(bar_spans(values.rx_pct, layout.bar_width));
    spans.push(Span::raw(FIELD_SEP));
    spans.push(Span::styled(format_pct(values.rx_pct), Styles::default()));
    spans.push(Span::raw(FIELD_SEP));
    spans.push(rate_span(values.rx_gbps, values.reset));
    spans.push(Span::styled(TX_ARROW, Styles::tx()));
    spans.extend(bar_spans(values.tx_pct, layout.bar_width));
    spans.push(Span::raw(FIELD_SEP));
    spans.push(Span::styled(format_pct(values.tx_pct), Styles::default()));
    spans.push(Span::raw(FIELD_SEP));
    spans.push(rate_span(values.tx_gbps, values.reset));
    Line::from(spans)
}

/// Renders every port, in monitor order, against one shared width.
pub fn render_rows(interfaces: &[InterfaceState], terminal_width: usize) -> Vec<Line<'static>> {
    interfaces
        .iter()
        .map(|state| {
            let header = header_text(state.id(), &state.descriptor().label(FmtStyle::Full));
            render_row(&header, &RowValues::from_state(state), terminal_width)
        })
        .collect()
}

/// Bar of `width` cells, filled proportionally to `pct` with a left-to-right gradient.
pub fn bar_spans(pct: f64, width: usize) -> Vec<Span<'static>> {
    let filled = ((pct.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);

    let mut spans: Vec<Span<'static>> = (0..filled)
        .map(|i| {
            Span::styled(
                FILLED.to_string(),
                Style::default().fg(gradient_at(i, width)),
            )
        })
        .collect();
    if filled < width {
        spans.push(Span::styled(
            EMPTY.to_string().repeat(width - filled),
            Style::default().fg(Theme::FG_DIM),
        ));
    }
    spans
}

fn rate_span(gbps: f64, reset: bool) -> Span<'static> {
    if reset {
        Span::styled(
            format!("{:>width$}", "reset", width = RATE_FIELD_WIDTH),
            Styles::modified_item(),
        )
    } else {
        Span::styled(format_gbps(gbps, FmtStyle::Full), Styles::default())
    }
}

/// Color of cell `i` of a bar `width` cells wide.
fn gradient_at(i: usize, width: usize) -> Color {
    let t = if width > 1 {
        i as f64 / (width - 1) as f64
    } else {
        0.0
    };
    let (r0, g0, b0) = Theme::GRADIENT_START;
    let (r1, g1, b1) = Theme::GRADIENT_END;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
