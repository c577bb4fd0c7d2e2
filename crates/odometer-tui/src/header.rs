//! TUI header panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use odometer_core::{Alignment, Value};

use crate::styles::ColorTheme;

/// Render the header panel.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    value: Value,
    alignment: Alignment,
    paused: bool,
    theme: &ColorTheme,
) {
    let state = if paused { " | paused" } else { "" };
    let text = vec![Line::from(vec![
        Span::styled("odometer", theme.header_style()),
        Span::styled(
            format!(" | value={value} | keys={alignment}{state}"),
            theme.text_style(),
        ),
    ])];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.muted_style());

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
