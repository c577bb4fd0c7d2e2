//! # odometer-core
//!
//! Rendering-agnostic core for a rolling-digit odometer. Computes per-position
//! scroll direction and distance between two values, tracks each position
//! through a small state machine, and exposes the glyph window a renderer
//! draws. Also provides the eased count-up animation.

pub mod animation;
pub mod constants;
pub mod count_up;
pub mod error;
pub mod fallback;
pub mod metrics;
pub mod odometer;
pub mod options;
pub mod position;
pub mod strip;
pub mod value;

// Re-exports
pub use animation::{Easing, Tween};
pub use constants::{exit_codes, DEFAULT_CELL_HEIGHT_PX, VISIBILITY_THRESHOLD};
pub use count_up::CountUp;
pub use error::OdometerError;
pub use fallback::NonNumericFallback;
pub use metrics::{CellHeight, FixedProbe, GlyphMetrics, LayoutProbe};
pub use odometer::{OdometerValue, Update};
pub use options::{CountUpOptions, OdometerOptions};
pub use position::{Change, DigitSlot, Phase, SlotView};
pub use strip::{DigitStrip, Direction, StripWindow};
pub use value::{Alignment, CharacterSequence, Value};
