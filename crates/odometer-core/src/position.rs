//! Per-position state machine.
//!
//! Each position is either resting on a character or rolling from its last
//! settled character to a new one. The settled character only advances when
//! the roll completes; a change that arrives mid-roll restarts the tween from
//! the offset between the last settled character and the new target.

use std::fmt;
use std::time::Duration;

use crate::animation::{Easing, Tween};
use crate::fallback::{Fade, NonNumericFallback};
use crate::metrics::{GlyphMetrics, LayoutProbe};
use crate::options::OdometerOptions;
use crate::strip::{digit_value, DigitStrip, Direction, StripWindow};

/// Where a position is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Settled(char),
    Transitioning {
        from: char,
        to: char,
        tween: Tween,
        /// Cell height the offset was computed against.
        cell_height: f64,
    },
}

/// What a character update did to a position.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// A new position appeared and fades in without a roll.
    Mounted { key: usize, character: char },
    /// A digit roll started.
    Rolled {
        key: usize,
        from: char,
        to: char,
        offset: f64,
        direction: Direction,
    },
    /// A literal glyph replaced the previous one with a fade.
    Faded { key: usize, from: char, to: char },
    /// An in-flight roll was cancelled by a return to its settled digit.
    Snapped { key: usize, character: char },
    /// Nothing to animate.
    Unchanged { key: usize, character: char },
    /// The position is leaving and fades out.
    Unmounted { key: usize, character: char },
}

impl Change {
    /// Position key the change applies to.
    #[must_use]
    pub fn key(&self) -> usize {
        match *self {
            Self::Mounted { key, .. }
            | Self::Rolled { key, .. }
            | Self::Faded { key, .. }
            | Self::Snapped { key, .. }
            | Self::Unchanged { key, .. }
            | Self::Unmounted { key, .. } => key,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Mounted { key, character } => write!(f, "[{key}] mount {character:?} (fade in)"),
            Self::Rolled {
                key,
                from,
                to,
                offset,
                direction,
            } => write!(
                f,
                "[{key}] roll {from:?} -> {to:?} offset {offset:+.0}px ({})",
                match direction {
                    Direction::Up => "up",
                    Direction::Down => "down",
                    Direction::Still => "still",
                }
            ),
            Self::Faded { key, from, to } => write!(f, "[{key}] fade {from:?} -> {to:?}"),
            Self::Snapped { key, character } => write!(f, "[{key}] snap back to {character:?}"),
            Self::Unchanged { key, character } => write!(f, "[{key}] keep {character:?}"),
            Self::Unmounted { key, character } => {
                write!(f, "[{key}] unmount {character:?} (fade out)")
            }
        }
    }
}

/// What a renderer draws for a position on this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotView {
    /// A digit strip. `steps` is the remaining roll in cells: the visible
    /// cell shows strip index `window.current() - steps`.
    Strip {
        window: StripWindow,
        steps: f64,
        opacity: f64,
    },
    /// A literal glyph.
    Literal(NonNumericFallback),
}

/// One character position of an odometer.
#[derive(Debug, Clone)]
pub struct DigitSlot {
    key: usize,
    phase: Phase,
    metrics: GlyphMetrics,
    fade: Fade,
    leaving: bool,
    strip_duration: Duration,
    fade_duration: Duration,
    easing: Easing,
}

impl DigitSlot {
    /// A position resting on `ch`, fully visible.
    #[must_use]
    pub fn settled(key: usize, ch: char, opts: &OdometerOptions) -> Self {
        Self {
            key,
            phase: Phase::Settled(ch),
            metrics: GlyphMetrics::new(opts.fallback_cell_height),
            fade: Fade::shown(ch),
            leaving: false,
            strip_duration: opts.strip_duration(),
            fade_duration: opts.fade_duration(),
            easing: opts.easing,
        }
    }

    /// A position that appears on `ch` and fades in without rolling.
    #[must_use]
    pub fn fresh(key: usize, ch: char, opts: &OdometerOptions) -> Self {
        let mut slot = Self::settled(key, ch, opts);
        slot.fade = Fade::appear(ch, slot.fade_duration);
        slot
    }

    /// A position mounted against an assumed prior character.
    #[must_use]
    pub fn rolling(key: usize, prior: char, ch: char, opts: &OdometerOptions) -> (Self, Change) {
        let mut slot = Self::settled(key, prior, opts);
        let change = slot.set_char(ch);
        (slot, change)
    }

    /// Position key.
    #[must_use]
    pub fn key(&self) -> usize {
        self.key
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Last settled character.
    #[must_use]
    pub fn previous_char(&self) -> char {
        match self.phase {
            Phase::Settled(c) | Phase::Transitioning { from: c, .. } => c,
        }
    }

    /// Character being displayed or rolled to.
    #[must_use]
    pub fn current_char(&self) -> char {
        match self.phase {
            Phase::Settled(c) | Phase::Transitioning { to: c, .. } => c,
        }
    }

    /// Identity of the animated wrapper: the current character.
    #[must_use]
    pub fn animation_key(&self) -> char {
        self.current_char()
    }

    #[must_use]
    pub fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    /// Measure the glyph cell if not yet measured.
    pub fn measure(&mut self, probe: &dyn LayoutProbe) {
        self.metrics.measure(probe);
    }

    /// Strip math between the settled and current characters.
    #[must_use]
    pub fn strip(&self) -> DigitStrip {
        let cell_height = match self.phase {
            Phase::Transitioning { cell_height, .. } => cell_height,
            Phase::Settled(_) => self.metrics.height(),
        };
        DigitStrip::new(self.previous_char(), self.current_char(), cell_height)
    }

    /// Whether the current character is a digit.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        digit_value(self.current_char()).is_some()
    }

    /// Move the position to `ch`.
    pub fn set_char(&mut self, ch: char) -> Change {
        let key = self.key;
        if ch == self.current_char() {
            return Change::Unchanged { key, character: ch };
        }
        let from = self.previous_char();
        let cell_height = self.metrics.height();
        let strip = DigitStrip::new(from, ch, cell_height);
        let offset = strip.offset();

        if offset != 0.0 {
            tracing::debug!(key, %from, to = %ch, offset, "digit roll");
            self.phase = Phase::Transitioning {
                from,
                to: ch,
                tween: Tween::new(offset, 0.0, self.strip_duration, self.easing),
                cell_height,
            };
            self.fade = Fade::shown(ch);
            return Change::Rolled {
                key,
                from,
                to: ch,
                offset,
                direction: strip.direction(),
            };
        }

        let displayed = self.current_char();
        self.phase = Phase::Settled(ch);
        if ch == from && digit_value(ch).is_some() {
            tracing::debug!(key, character = %ch, "roll cancelled");
            self.fade = Fade::shown(ch);
            return Change::Snapped { key, character: ch };
        }

        tracing::debug!(key, from = %displayed, to = %ch, "literal fade");
        self.fade.rekey(ch, self.fade_duration);
        Change::Faded {
            key,
            from: displayed,
            to: ch,
        }
    }

    /// Start fading the position out.
    pub fn leave(&mut self) -> Change {
        if !self.leaving {
            self.leaving = true;
            self.fade.disappear(self.fade_duration);
        }
        Change::Unmounted {
            key: self.key,
            character: self.current_char(),
        }
    }

    /// Whether the position is fading out.
    #[must_use]
    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    /// Whether the fade-out has finished and the position can be dropped.
    #[must_use]
    pub fn is_gone(&self) -> bool {
        self.leaving && self.fade.is_complete()
    }

    /// Whether any tween is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. }) || !self.fade.is_complete()
    }

    /// Current pixel offset of the strip.
    #[must_use]
    pub fn offset_px(&self) -> f64 {
        match &self.phase {
            Phase::Transitioning { tween, .. } => tween.value(),
            Phase::Settled(_) => 0.0,
        }
    }

    /// Remaining roll in cells.
    #[must_use]
    pub fn steps_remaining(&self) -> f64 {
        match &self.phase {
            Phase::Transitioning {
                tween, cell_height, ..
            } => tween.value() / cell_height,
            Phase::Settled(_) => 0.0,
        }
    }

    /// Advance tweens. Returns `true` when a roll settled on this frame.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let completed = match &mut self.phase {
            Phase::Transitioning { to, tween, .. } => {
                tween.advance(dt);
                tween.is_complete().then_some(*to)
            }
            Phase::Settled(_) => None,
        };
        self.fade.advance(dt);

        if let Some(to) = completed {
            tracing::debug!(key = self.key, character = %to, "digit settled");
            self.phase = Phase::Settled(to);
            return true;
        }
        false
    }

    /// Render model for this frame.
    #[must_use]
    pub fn view(&self) -> SlotView {
        let current = self.current_char();
        match digit_value(current) {
            Some(d) => SlotView::Strip {
                window: StripWindow::new(d),
                steps: self.steps_remaining(),
                opacity: self.fade.opacity(),
            },
            None => SlotView::Literal(NonNumericFallback::new(current, self.fade.opacity())),
        }
    }
}
