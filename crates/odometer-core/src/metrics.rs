//! Glyph cell measurement.
//!
//! A cell is unmeasured until the host reports a usable height after first
//! paint. Until then, offset math runs against a fallback height so the first
//! animation frame is never degenerate.

use crate::constants::DEFAULT_CELL_HEIGHT_PX;

/// Host-side layout measurement of a mounted glyph container.
pub trait LayoutProbe {
    /// Rendered box height of one glyph cell in pixels, if known.
    fn glyph_height(&self) -> Option<f64>;
}

/// Fixed-height probe, useful for hosts with a known cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProbe(pub f64);

impl LayoutProbe for FixedProbe {
    fn glyph_height(&self) -> Option<f64> {
        Some(self.0)
    }
}

/// Two-phase cell height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CellHeight {
    #[default]
    Unmeasured,
    Measured(f64),
}

/// Measured height of a single glyph cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    cell: CellHeight,
    fallback: f64,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_HEIGHT_PX)
    }
}

impl GlyphMetrics {
    /// Unmeasured metrics with the given fallback height.
    #[must_use]
    pub fn new(fallback: f64) -> Self {
        let fallback = if usable(fallback) {
            fallback
        } else {
            DEFAULT_CELL_HEIGHT_PX
        };
        Self {
            cell: CellHeight::Unmeasured,
            fallback,
        }
    }

    /// Measure the cell once. Later calls are ignored after a usable height
    /// has been recorded; a missing or zero height leaves the cell unmeasured.
    pub fn measure(&mut self, probe: &dyn LayoutProbe) {
        if self.is_measured() {
            return;
        }
        match probe.glyph_height() {
            Some(h) if usable(h) => {
                tracing::debug!(height = h, "glyph cell measured");
                self.cell = CellHeight::Measured(h);
            }
            other => {
                tracing::debug!(?other, fallback = self.fallback, "glyph cell unmeasurable");
            }
        }
    }

    /// The raw measurement state.
    #[must_use]
    pub fn cell(&self) -> CellHeight {
        self.cell
    }

    /// Whether a usable height has been recorded.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        matches!(self.cell, CellHeight::Measured(_))
    }

    /// Height to use for offset math.
    #[must_use]
    pub fn height(&self) -> f64 {
        match self.cell {
            CellHeight::Measured(h) => h,
            CellHeight::Unmeasured => self.fallback,
        }
    }
}

fn usable(h: f64) -> bool {
    h.is_finite() && h > 0.0
}
