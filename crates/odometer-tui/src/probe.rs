//! Glyph cell measurement from the terminal's reported window size.

use crossterm::terminal::{self, WindowSize};

use odometer_core::LayoutProbe;

/// Measures the pixel height of one terminal row.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProbe;

impl LayoutProbe for TerminalProbe {
    fn glyph_height(&self) -> Option<f64> {
        match terminal::window_size() {
            Ok(size) => cell_height(&size),
            Err(err) => {
                tracing::debug!(%err, "terminal pixel size unavailable");
                None
            }
        }
    }
}

/// Pixel height of a row, when the terminal reports pixel dimensions.
#[must_use]
pub fn cell_height(size: &WindowSize) -> Option<f64> {
    if size.rows == 0 || size.height == 0 {
        return None;
    }
    Some(f64::from(size.height) / f64::from(size.rows))
}
