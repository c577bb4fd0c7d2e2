//! Odometer widget.
//!
//! Each position is one terminal column. The middle row is the visible cell;
//! rows above and below show the neighbouring digits of the strip so a roll
//! passes over real glyphs.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use odometer_core::position::SlotView;
use odometer_core::OdometerValue;

use crate::styles::ColorTheme;

/// A glyph drawn in one row of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    /// The visible cell, with its opacity.
    Face(char, f64),
    /// A neighbouring digit on the strip.
    Ghost(char),
}

/// Glyphs of one column, top to bottom. `None` rows are blank.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn column(view: &SlotView, rows: u16) -> Vec<Option<Glyph>> {
    let rows = i32::from(rows);
    let center = rows / 2;
    match *view {
        SlotView::Strip {
            window,
            steps,
            opacity,
        } => {
            let position = (f64::from(window.current()) - steps).round() as i32;
            (0..rows)
                .map(|r| {
                    let glyph = window.glyph_at(position + (r - center))?;
                    Some(if r == center {
                        Glyph::Face(glyph, opacity)
                    } else {
                        Glyph::Ghost(glyph)
                    })
                })
                .collect()
        }
        SlotView::Literal(fallback) => (0..rows)
            .map(|r| (r == center).then(|| Glyph::Face(fallback.character(), fallback.opacity())))
            .collect(),
    }
}

/// Text of the visible row, with transparent glyphs as spaces.
#[must_use]
pub fn face_row(odometer: &OdometerValue) -> String {
    odometer
        .views()
        .iter()
        .map(|view| match column(view, 1).first().copied().flatten() {
            Some(Glyph::Face(c, opacity)) if opacity > 0.0 => c,
            _ => ' ',
        })
        .collect()
}

/// Render the odometer into `area`.
pub fn render_odometer(
    frame: &mut Frame,
    area: Rect,
    odometer: &OdometerValue,
    theme: &ColorTheme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Odometer ")
        .border_style(theme.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let accent = theme.accent(odometer.style());
    let columns: Vec<Vec<Option<Glyph>>> = odometer
        .views()
        .iter()
        .map(|v| column(v, inner.height))
        .collect();

    let lines: Vec<Line> = (0..inner.height as usize)
        .map(|row| {
            let spans: Vec<Span> = columns
                .iter()
                .map(|col| match col.get(row).copied().flatten() {
                    Some(Glyph::Face(c, opacity)) => match theme.glyph_style(accent, opacity) {
                        Some(style) => Span::styled(c.to_string(), style),
                        None => Span::raw(" "),
                    },
                    Some(Glyph::Ghost(c)) => Span::styled(c.to_string(), theme.ghost_style()),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
