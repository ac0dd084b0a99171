//! Main rendering logic for the TUI.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PollInterval;
use crate::fmt::format_interval;
use crate::layout::render_rows;
use crate::model::InterfaceState;

use super::state::ViewportState;
use super::style::Styles;

/// Main render function: header bar, port rows, footer.
pub fn render(
    frame: &mut Frame,
    interfaces: &[InterfaceState],
    viewport: &ViewportState,
    interval: PollInterval,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Fill(1),   // Rows
        Constraint::Length(1), // Footer
    ])
    .split(frame.area());

    render_header(frame, chunks[0], interfaces.len(), interval);
    render_content(frame, chunks[1], interfaces, viewport);
    render_footer(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect, ports: usize, interval: PollInterval) {
    let chunks = Layout::horizontal([
        Constraint::Length(7),  // Name
        Constraint::Length(6),  // Mode
        Constraint::Fill(1),    // Interval / ports
        Constraint::Length(10), // Clock
    ])
    .split(area);

    frame.render_widget(Paragraph::new(" ibmon ").style(Styles::header()), chunks[0]);
    frame.render_widget(Paragraph::new(" LIVE ").style(Styles::header()), chunks[1]);

    let noun = if ports == 1 { "port" } else { "ports" };
    let info = format!(
        " interval {} | {} {}",
        format_interval(interval.as_secs_f64()),
        ports,
        noun
    );
    frame.render_widget(Paragraph::new(info).style(Styles::header()), chunks[2]);

    let clock = Local::now().format("%H:%M:%S ").to_string();
    frame.render_widget(
        Paragraph::new(clock)
            .style(Styles::header())
            .alignment(Alignment::Right),
        chunks[3],
    );
}

fn render_content(
    frame: &mut Frame,
    area: Rect,
    interfaces: &[InterfaceState],
    viewport: &ViewportState,
) {
    let lines: Vec<Line> = render_rows(interfaces, viewport.width as usize)
        .into_iter()
        .skip(viewport.scroll)
        .take(area.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(lines).style(Styles::default()), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled("[", Styles::dim()),
        Span::styled("q/ctrl+c", Styles::help_key()),
        Span::styled(" to quit | ", Styles::dim()),
        Span::styled("↑/↓", Styles::help_key()),
        Span::styled(" to scroll]", Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}
