//! Tweens and easing curves.
//!
//! The host advances every tween with its frame delta; a tween reports
//! completion exactly once it reaches its end value.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OdometerError;

/// Easing curve applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// `1 - (1 - t)^3`.
    CubicOut,
    /// `1 - 2^(-10t)`, snapping to 1 at the end.
    #[default]
    ExponentialOut,
    /// Exponential in the first half, exponential out in the second.
    ExponentialInOut,
    /// Jump straight to the end value.
    Instant,
}

impl Easing {
    /// Map `t` in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
            Self::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::Instant => 1.0,
        }
    }
}

impl FromStr for Easing {
    type Err = OdometerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "cubic-out" => Ok(Self::CubicOut),
            "exponential-out" | "expo-out" => Ok(Self::ExponentialOut),
            "exponential-in-out" | "expo-in-out" => Ok(Self::ExponentialInOut),
            "instant" => Ok(Self::Instant),
            other => Err(OdometerError::Config(format!("unknown easing {other:?}"))),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::CubicOut => "cubic-out",
            Self::ExponentialOut => "exponential-out",
            Self::ExponentialInOut => "exponential-in-out",
            Self::Instant => "instant",
        };
        f.write_str(name)
    }
}

/// Interpolation of one scalar from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl Tween {
    /// Start a tween at `from`.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    /// A tween that is already resting at `value`.
    #[must_use]
    pub fn settled(value: f64) -> Self {
        Self::new(value, value, Duration::ZERO, Easing::Instant)
    }

    /// Normalized time in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// End value.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Whether the tween has reached its end value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.easing == Easing::Instant || self.elapsed >= self.duration
    }

    /// Advance by `dt`. Returns `true` when this call completed the tween.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.is_complete() {
            return false;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_complete()
    }
}
