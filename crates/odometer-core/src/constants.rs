//! Constants for odometer geometry, timing, and process exit codes.

use std::time::Duration;

/// Cell height (in pixels) used for offset math before a glyph is measured.
pub const DEFAULT_CELL_HEIGHT_PX: f64 = 48.0;

/// Default duration of a digit-strip roll.
pub const DEFAULT_STRIP_DURATION: Duration = Duration::from_millis(600);

/// Default duration of the fallback opacity fade.
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(250);

/// Default duration of a count-up run.
pub const DEFAULT_COUNT_UP_DURATION: Duration = Duration::from_millis(2000);

/// Fraction of a count-up that must be visible before it starts.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Largest number of decimal places a count-up will format.
pub const MAX_DECIMALS: u32 = 20;

/// Character assumed at every numeric position before the first value.
pub const INITIAL_DIGIT: char = '0';

/// Number of glyphs on a digit strip (`0..=9`).
pub const STRIP_LEN: u8 = 10;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Interrupted by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
