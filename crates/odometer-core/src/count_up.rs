//! Eased count-up from zero to a target.
//!
//! The run starts once, the first time the host reports the display as at
//! least `threshold` visible. Every frame the eased count is rounded to the
//! configured number of decimals and wrapped in the prefix and suffix.

use std::time::Duration;

use crate::animation::Easing;
use crate::error::OdometerError;
use crate::options::CountUpOptions;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RunState {
    Idle,
    Running { elapsed: Duration },
    Done,
}

/// Count-up animation state.
#[derive(Debug, Clone)]
pub struct CountUp {
    options: CountUpOptions,
    state: RunState,
    count: f64,
}

impl CountUp {
    /// A count-up that has not started.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `options`.
    pub fn new(options: CountUpOptions) -> Result<Self, OdometerError> {
        let options = options.normalize();
        options.validate()?;
        Ok(Self {
            options,
            state: RunState::Idle,
            count: 0.0,
        })
    }

    #[must_use]
    pub fn options(&self) -> &CountUpOptions {
        &self.options
    }

    /// Report the visible fraction of the display. Returns `true` if this
    /// report started the run.
    pub fn on_visibility(&mut self, ratio: f64) -> bool {
        if self.state != RunState::Idle || ratio < self.options.threshold {
            return false;
        }
        self.start();
        true
    }

    /// Start the run regardless of visibility. Ignored once started.
    pub fn start(&mut self) {
        if self.state == RunState::Idle {
            tracing::debug!(goal = self.options.target, "count-up started");
            self.state = RunState::Running {
                elapsed: Duration::ZERO,
            };
        }
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.state != RunState::Idle
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == RunState::Done
    }

    /// Normalized progress of the run in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match self.state {
            RunState::Idle => 0.0,
            RunState::Done => 1.0,
            RunState::Running { elapsed } => {
                let total = self.options.duration().as_secs_f64();
                if total <= 0.0 {
                    1.0
                } else {
                    (elapsed.as_secs_f64() / total).min(1.0)
                }
            }
        }
    }

    /// Advance the run. Returns the new count when it changed.
    pub fn tick(&mut self, dt: Duration) -> Option<f64> {
        let RunState::Running { elapsed } = self.state else {
            return None;
        };
        let elapsed = (elapsed + dt).min(self.options.duration());
        self.state = RunState::Running { elapsed };

        let progress = self.progress();
        let next = self.round(Easing::CubicOut.apply(progress) * self.options.target);
        if progress >= 1.0 {
            tracing::debug!(count = next, "count-up complete");
            self.state = RunState::Done;
        }

        let changed = (next - self.count).abs() > 0.0;
        self.count = next;
        changed.then_some(next)
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> f64 {
        self.count
    }

    /// Current count as an odometer value. Counts beyond the `i128` range
    /// stay floats.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn value(&self) -> Value {
        if self.options.decimals == 0 && self.count.abs() < i128::MAX as f64 {
            Value::Integer(self.count as i128)
        } else {
            Value::Float(self.count)
        }
    }

    /// The count formatted with the configured decimals.
    #[must_use]
    pub fn formatted_number(&self) -> String {
        let decimals = self.options.decimals as usize;
        if decimals == 0 {
            format!("{}", self.value())
        } else {
            format!("{:.*}", decimals, self.count)
        }
    }

    /// Prefix, formatted count, and suffix.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!(
            "{}{}{}",
            self.options.prefix,
            self.formatted_number(),
            self.options.suffix
        )
    }

    fn round(&self, x: f64) -> f64 {
        let decimals = self.options.decimals as usize;
        if decimals == 0 {
            // Halves round toward positive infinity.
            (x + 0.5).floor()
        } else {
            format!("{x:.decimals$}").parse().unwrap_or(x)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_up(options: CountUpOptions) -> CountUp {
        CountUp::new(options).unwrap()
    }

    #[test]
    fn idle_until_visible() {
        let mut c = count_up(CountUpOptions::to(100.0));
        assert!(!c.has_started());
        assert_eq!(c.tick(Duration::from_millis(500)), None);
        assert!(!c.on_visibility(0.3));
        assert!(c.on_visibility(0.5));
        assert!(c.has_started());
    }

    #[test]
    fn starts_only_once() {
        let mut c = count_up(CountUpOptions::to(100.0));
        assert!(c.on_visibility(1.0));
        c.tick(Duration::from_millis(2000));
        assert!(c.is_complete());
        assert!(!c.on_visibility(1.0));
        assert!(c.is_complete());
        assert!((c.count() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cubic_out_frames() {
        let mut c = count_up(CountUpOptions::to(1000.0));
        c.start();
        assert_eq!(c.tick(Duration::from_millis(1000)), Some(875.0));
        assert_eq!(c.display_text(), "875");
        assert_eq!(c.tick(Duration::from_millis(1000)), Some(1000.0));
        assert!(c.is_complete());
        assert_eq!(c.tick(Duration::from_millis(16)), None);
    }

    #[test]
    fn unchanged_frame_reports_none() {
        let mut c = count_up(CountUpOptions::to(1.0));
        c.start();
        // 1 * (1 - (1 - 0.0005)^3) rounds to 0.
        assert_eq!(c.tick(Duration::from_millis(1)), None);
    }

    #[test]
    fn decimals_prefix_suffix() {
        let mut c = count_up(CountUpOptions {
            prefix: "$".into(),
            suffix: "M".into(),
            decimals: 2,
            ..CountUpOptions::to(12.5)
        });
        assert_eq!(c.display_text(), "$0.00M");
        c.start();
        c.tick(Duration::from_millis(2000));
        assert_eq!(c.display_text(), "$12.50M");
        assert_eq!(c.value(), Value::Float(12.5));
    }

    #[test]
    fn integer_value_for_odometer() {
        let mut c = count_up(CountUpOptions::to(42.0));
        c.start();
        c.tick(Duration::from_secs(5));
        assert_eq!(c.value(), Value::Integer(42));
    }

    #[test]
    fn huge_target_does_not_saturate() {
        let mut c = count_up(CountUpOptions::to(1e40));
        c.start();
        c.tick(Duration::from_secs(5));
        assert_eq!(c.value(), Value::Float(1e40));
        assert_eq!(c.display_text(), format!("{}", 1e40_f64));
        assert!(!c.display_text().starts_with("170141183"));
    }

    #[test]
    fn invalid_options_rejected() {
        let err = CountUp::new(CountUpOptions {
            decimals: 25,
            ..CountUpOptions::to(1.0)
        })
        .unwrap_err();
        assert_eq!(err, OdometerError::InvalidDecimals(25));
    }

    #[test]
    fn progress_is_clamped() {
        let mut c = count_up(CountUpOptions {
            duration_ms: 100,
            ..CountUpOptions::to(10.0)
        });
        assert!(c.progress().abs() < f64::EPSILON);
        c.start();
        c.tick(Duration::from_millis(50));
        assert!((c.progress() - 0.5).abs() < 1e-9);
        c.tick(Duration::from_millis(500));
        assert!((c.progress() - 1.0).abs() < f64::EPSILON);
    }
}
