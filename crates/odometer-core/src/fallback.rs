//! Literal-character rendering and opacity fades.
//!
//! Any position whose character is not an ASCII digit (a sign, a decimal
//! point, the letters of `NaN`) is drawn as the literal glyph. Its only
//! animation is an opacity fade keyed by the character value.

use std::time::Duration;

use crate::animation::{Easing, Tween};

/// Opacity fade keyed by a character.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    key: char,
    tween: Tween,
}

impl Fade {
    /// Fully visible, no transition.
    #[must_use]
    pub fn shown(key: char) -> Self {
        Self {
            key,
            tween: Tween::settled(1.0),
        }
    }

    /// Fade in from transparent.
    #[must_use]
    pub fn appear(key: char, duration: Duration) -> Self {
        Self {
            key,
            tween: Tween::new(0.0, 1.0, duration, Easing::Linear),
        }
    }

    /// Re-key the fade. Replays the intro only when the character changes.
    pub fn rekey(&mut self, key: char, duration: Duration) {
        if key != self.key {
            *self = Self::appear(key, duration);
        }
    }

    /// Fade out from the current opacity.
    pub fn disappear(&mut self, duration: Duration) {
        self.tween = Tween::new(self.opacity(), 0.0, duration, Easing::Linear);
    }

    /// Character the fade is keyed by.
    #[must_use]
    pub fn key(&self) -> char {
        self.key
    }

    /// Current opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.tween.value().clamp(0.0, 1.0)
    }

    /// Whether the fade has finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }

    /// Advance the fade. Returns `true` when this call finished it.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.tween.advance(dt)
    }
}

/// Render model for a literal glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonNumericFallback {
    character: char,
    opacity: f64,
}

impl NonNumericFallback {
    #[must_use]
    pub fn new(character: char, opacity: f64) -> Self {
        Self {
            character,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// From a fade, which carries both the glyph and its opacity.
    #[must_use]
    pub fn from_fade(fade: &Fade) -> Self {
        Self::new(fade.key(), fade.opacity())
    }

    /// Glyph to draw.
    #[must_use]
    pub fn character(&self) -> char {
        self.character
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}
