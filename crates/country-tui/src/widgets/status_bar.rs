//! Status bar — bottom line with search settings and keybindings.

use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ACCENT, C_MUTED, C_SECONDARY, C_SEPARATOR};

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, delay: Duration, limit: usize) {
    let spans = vec![
        Span::styled(
            " SEARCH ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}ms · ≤{} ", delay.as_millis(), limit),
            Style::default().fg(C_SECONDARY),
        ),
        Span::styled(
            " type to search  Tab pane  ↑↓/PgUp/PgDn scroll  Ctrl-↑↓ delay  Esc clear/quit",
            Style::default().fg(C_MUTED),
        ),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
