//! Odometer and count-up options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::constants::{
    DEFAULT_CELL_HEIGHT_PX, DEFAULT_COUNT_UP_DURATION, DEFAULT_FADE_DURATION,
    DEFAULT_STRIP_DURATION, MAX_DECIMALS, VISIBILITY_THRESHOLD,
};
use crate::error::OdometerError;
use crate::value::Alignment;

/// Options for an odometer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdometerOptions {
    /// Cell height (px) used until a glyph is measured.
    pub fallback_cell_height: f64,
    /// Duration of a digit roll in milliseconds (0 = default).
    pub strip_duration_ms: u64,
    /// Duration of the literal fade in milliseconds (0 = default).
    pub fade_duration_ms: u64,
    /// Easing of the digit roll.
    pub easing: Easing,
    /// How positions are keyed.
    pub alignment: Alignment,
    /// Free-form style hint passed through to the renderer.
    pub style: Option<String>,
}

impl Default for OdometerOptions {
    fn default() -> Self {
        Self {
            fallback_cell_height: DEFAULT_CELL_HEIGHT_PX,
            strip_duration_ms: duration_ms(DEFAULT_STRIP_DURATION),
            fade_duration_ms: duration_ms(DEFAULT_FADE_DURATION),
            easing: Easing::default(),
            alignment: Alignment::default(),
            style: None,
        }
    }
}

impl OdometerOptions {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.fallback_cell_height == 0.0 {
            self.fallback_cell_height = DEFAULT_CELL_HEIGHT_PX;
        }
        if self.strip_duration_ms == 0 {
            self.strip_duration_ms = duration_ms(DEFAULT_STRIP_DURATION);
        }
        if self.fade_duration_ms == 0 {
            self.fade_duration_ms = duration_ms(DEFAULT_FADE_DURATION);
        }
        self
    }

    /// Reject options that cannot animate.
    ///
    /// # Errors
    ///
    /// Returns [`OdometerError::InvalidCellHeight`] for a non-positive or
    /// non-finite fallback height.
    pub fn validate(&self) -> Result<(), OdometerError> {
        if !self.fallback_cell_height.is_finite() || self.fallback_cell_height <= 0.0 {
            return Err(OdometerError::InvalidCellHeight(self.fallback_cell_height));
        }
        Ok(())
    }

    #[must_use]
    pub fn strip_duration(&self) -> Duration {
        Duration::from_millis(self.strip_duration_ms)
    }

    #[must_use]
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

/// Options for a count-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountUpOptions {
    /// Number to count up to.
    pub target: f64,
    /// Text placed before the number.
    pub prefix: String,
    /// Text placed after the number.
    pub suffix: String,
    /// Run length in milliseconds (0 = default).
    pub duration_ms: u64,
    /// Decimal places shown on every frame.
    pub decimals: u32,
    /// Visible fraction that starts the run.
    pub threshold: f64,
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self {
            target: 0.0,
            prefix: String::new(),
            suffix: String::new(),
            duration_ms: duration_ms(DEFAULT_COUNT_UP_DURATION),
            decimals: 0,
            threshold: VISIBILITY_THRESHOLD,
        }
    }
}

impl CountUpOptions {
    /// Count-up to `target` with default formatting.
    #[must_use]
    pub fn to(target: f64) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.duration_ms == 0 {
            self.duration_ms = duration_ms(DEFAULT_COUNT_UP_DURATION);
        }
        if self.threshold == 0.0 {
            self.threshold = VISIBILITY_THRESHOLD;
        }
        self
    }

    /// Reject options that cannot be formatted or triggered.
    ///
    /// # Errors
    ///
    /// Returns [`OdometerError::InvalidDecimals`], [`OdometerError::InvalidValue`]
    /// for a non-finite target, or [`OdometerError::Config`] for a threshold
    /// outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), OdometerError> {
        if self.decimals > MAX_DECIMALS {
            return Err(OdometerError::InvalidDecimals(self.decimals));
        }
        if !self.target.is_finite() {
            return Err(OdometerError::InvalidValue(self.target.to_string()));
        }
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(OdometerError::Config(format!(
                "visibility threshold {} is outside (0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_ms(d: Duration) -> u64 {
    d.as_millis() as u64
}
