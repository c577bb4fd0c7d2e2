//! A row of digit positions for one displayed value.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::constants::INITIAL_DIGIT;
use crate::metrics::LayoutProbe;
use crate::options::OdometerOptions;
use crate::position::{Change, DigitSlot, SlotView};
use crate::strip::{digit_value, Direction};
use crate::value::{Alignment, CharacterSequence, Value};

/// Result of applying a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Value shown before, `None` on the first application.
    pub previous: Option<Value>,
    /// Value now shown.
    pub value: Value,
    /// Whether the value as a whole went up or down.
    pub trend: Direction,
    /// Per-position changes, in display order. Unmounted positions come last.
    pub changes: Vec<Change>,
}

impl Update {
    /// Whether nothing on screen will move.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes
            .iter()
            .all(|c| matches!(c, Change::Unchanged { .. }))
    }
}

/// An odometer: one [`DigitSlot`] per character of the displayed value.
#[derive(Debug, Clone)]
pub struct OdometerValue {
    options: OdometerOptions,
    value: Option<Value>,
    sequence: CharacterSequence,
    slots: BTreeMap<usize, DigitSlot>,
}

impl Default for OdometerValue {
    fn default() -> Self {
        Self::new(OdometerOptions::default())
    }
}

impl OdometerValue {
    /// An odometer with no value applied yet.
    #[must_use]
    pub fn new(options: OdometerOptions) -> Self {
        Self {
            options,
            value: None,
            sequence: CharacterSequence::default(),
            slots: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &OdometerOptions {
        &self.options
    }

    /// Style hint carried to the renderer.
    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.options.style.as_deref()
    }

    /// Current value (`0` until one is applied).
    #[must_use]
    pub fn value(&self) -> Value {
        self.value.unwrap_or_default()
    }

    /// Apply a new value and start the transitions it implies.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Update {
        let value = value.into();
        let previous = self.value;
        let sequence = CharacterSequence::from_value(&value);
        let alignment = self.options.alignment;
        let first = previous.is_none();

        let mut changes = Vec::with_capacity(sequence.len());
        for (key, ch) in sequence.keyed(alignment) {
            let change = match self.slots.get_mut(&key) {
                Some(slot) if !slot.is_leaving() => slot.set_char(ch),
                _ => {
                    let (slot, change) = self.mount(key, ch, first);
                    self.slots.insert(key, slot);
                    change
                }
            };
            changes.push(change);
        }

        let new_keys: Vec<usize> = sequence.keyed(alignment).map(|(k, _)| k).collect();
        for (key, slot) in &mut self.slots {
            if !new_keys.contains(key) && !slot.is_leaving() {
                changes.push(slot.leave());
            }
        }

        let trend = trend(previous.unwrap_or_default(), value);
        tracing::debug!(
            previous = %previous.map(|v| v.to_string()).unwrap_or_default(),
            value = %value,
            ?trend,
            "odometer value applied"
        );

        self.value = Some(value);
        self.sequence = sequence;
        Update {
            previous,
            value,
            trend,
            changes,
        }
    }

    fn mount(&self, key: usize, ch: char, first: bool) -> (DigitSlot, Change) {
        if first && digit_value(ch).is_some() {
            DigitSlot::rolling(key, INITIAL_DIGIT, ch, &self.options)
        } else {
            let slot = DigitSlot::fresh(key, ch, &self.options);
            (slot, Change::Mounted { key, character: ch })
        }
    }

    /// Measure every unmeasured glyph cell.
    pub fn measure(&mut self, probe: &dyn LayoutProbe) {
        for slot in self.slots.values_mut() {
            slot.measure(probe);
        }
    }

    /// Advance all positions by `dt`. Returns how many rolls settled.
    pub fn tick(&mut self, dt: Duration) -> usize {
        let mut settled = 0;
        for slot in self.slots.values_mut() {
            if slot.tick(dt) {
                settled += 1;
            }
        }
        self.slots.retain(|key, slot| {
            let keep = !slot.is_gone();
            if !keep {
                tracing::debug!(key, "position removed");
            }
            keep
        });
        settled
    }

    /// Run every transition to completion.
    pub fn settle(&mut self) -> usize {
        let longest = self
            .options
            .strip_duration()
            .max(self.options.fade_duration());
        self.tick(longest)
    }

    /// Whether every position is at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slots.values().all(|s| !s.is_animating())
    }

    /// Positions in display order, most significant first.
    pub fn slots(&self) -> Box<dyn Iterator<Item = &DigitSlot> + '_> {
        match self.options.alignment {
            Alignment::Right => Box::new(self.slots.values().rev()),
            Alignment::Left => Box::new(self.slots.values()),
        }
    }

    /// Position with the given key.
    #[must_use]
    pub fn slot(&self, key: usize) -> Option<&DigitSlot> {
        self.slots.get(&key)
    }

    /// Number of mounted positions, including ones fading out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Render models in display order.
    #[must_use]
    pub fn views(&self) -> Vec<SlotView> {
        self.slots().map(DigitSlot::view).collect()
    }

    /// Characters currently targeted by every mounted position.
    ///
    /// Equals the value's display string once all transitions settle.
    #[must_use]
    pub fn displayed_text(&self) -> String {
        self.slots().map(DigitSlot::current_char).collect()
    }

    /// Characters of the current value.
    #[must_use]
    pub fn sequence(&self) -> &CharacterSequence {
        &self.sequence
    }
}

fn trend(previous: Value, value: Value) -> Direction {
    let ordering = match (previous, value) {
        (Value::Integer(a), Value::Integer(b)) => Some(b.cmp(&a)),
        (a, b) => b.as_f64().partial_cmp(&a.as_f64()),
    };
    match ordering {
        Some(Ordering::Greater) => Direction::Up,
        Some(Ordering::Less) => Direction::Down,
        _ => Direction::Still,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FixedProbe;

    fn change_for(update: &Update, key: usize) -> &Change {
        update
            .changes
            .iter()
            .find(|c| c.key() == key)
            .expect("no change for key")
    }

    #[test]
    fn unset_value_is_zero() {
        let odometer = OdometerValue::default();
        assert_eq!(odometer.value(), Value::Integer(0));
        assert!(odometer.is_empty());
        assert!(odometer.is_settled());
    }

    #[test]
    fn first_value_rolls_from_zero() {
        let mut odometer = OdometerValue::default();
        let update = odometer.set_value(5);
        assert_eq!(update.previous, None);
        assert_eq!(update.trend, Direction::Up);
        match change_for(&update, 0) {
            Change::Rolled { from, to, offset, direction, .. } => {
                assert_eq!((*from, *to), ('0', '5'));
                assert!((offset.abs() - 240.0).abs() < f64::EPSILON);
                assert_eq!(*direction, Direction::Up);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn repeated_value_is_noop() {
        let mut odometer = OdometerValue::default();
        odometer.set_value(42);
        odometer.settle();
        let update = odometer.set_value(42);
        assert!(update.is_noop());
        assert_eq!(update.trend, Direction::Still);
        assert!(odometer.is_settled());
    }

    #[test]
    fn growing_value_mounts_leading_position() {
        let mut odometer = OdometerValue::default();
        odometer.set_value(99);
        odometer.settle();
        let update = odometer.set_value(100);
        assert_eq!(change_for(&update, 2), &Change::Mounted { key: 2, character: '1' });
        for key in [0, 1] {
            match change_for(&update, key) {
                Change::Rolled { from: '9', to: '0', offset, .. } => {
                    assert!((offset.abs() - 432.0).abs() < f64::EPSILON);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(update.trend, Direction::Up);
    }

    #[test]
    fn shrinking_value_unmounts_leading_position() {
        let mut odometer = OdometerValue::default();
        odometer.set_value(10);
        odometer.settle();
        let update = odometer.set_value(9);
        assert_eq!(update.trend, Direction::Down);
        assert_eq!(change_for(&update, 1), &Change::Unmounted { key: 1, character: '1' });
        assert!(matches!(
            change_for(&update, 0),
            Change::Rolled { from: '0', to: '9', .. }
        ));
        assert_eq!(odometer.len(), 2);
        odometer.settle();
        assert_eq!(odometer.len(), 1);
        assert_eq!(odometer.displayed_text(), "9");
    }

    #[test]
    fn returning_position_mounts_fresh() {
        let mut odometer = OdometerValue::default();
        odometer.set_value(10);
        odometer.settle();
        odometer.set_value(9);
        let update = odometer.set_value(12);
        assert_eq!(change_for(&update, 1), &Change::Mounted { key: 1, character: '1' });
        odometer.settle();
        assert_eq!(odometer.displayed_text(), "12");
    }

    #[test]
    fn negative_value_uses_literal_sign() {
        let mut odometer = OdometerValue::default();
        let update = odometer.set_value(-7);
        assert_eq!(change_for(&update, 1), &Change::Mounted { key: 1, character: '-' });
        assert!(matches!(change_for(&update, 0), Change::Rolled { to: '7', .. }));
        let views = odometer.views();
        assert!(matches!(views[0], SlotView::Literal(_)));
        assert!(matches!(views[1], SlotView::Strip { .. }));
    }

    #[test]
    fn left_alignment_keys_from_the_front() {
        let mut odometer = OdometerValue::new(OdometerOptions {
            alignment: Alignment::Left,
            ..OdometerOptions::default()
        });
        odometer.set_value(99);
        odometer.settle();
        let update = odometer.set_value(100);
        assert!(matches!(change_for(&update, 0), Change::Rolled { from: '9', to: '1', .. }));
        assert_eq!(change_for(&update, 2), &Change::Mounted { key: 2, character: '0' });
        odometer.settle();
        assert_eq!(odometer.displayed_text(), "100");
    }

    #[test]
    fn non_finite_values_render_literally() {
        let mut odometer = OdometerValue::default();
        odometer.set_value(f64::NAN);
        odometer.settle();
        assert_eq!(odometer.displayed_text(), "NaN");
        assert!(odometer
            .views()
            .iter()
            .all(|v| matches!(v, SlotView::Literal(_))));
    }

    #[test]
    fn tick_reports_settled_rolls() {
        let mut odometer = OdometerValue::default();
        odometer.set_value(12);
        assert_eq!(odometer.tick(Duration::from_millis(100)), 0);
        assert_eq!(odometer.tick(Duration::from_millis(600)), 2);
        assert!(odometer.is_settled());
    }

    #[test]
    fn measurement_applies_to_next_roll() {
        let mut odometer = OdometerValue::default();
        odometer.set_value(1);
        odometer.measure(&FixedProbe(20.0));
        odometer.settle();
        let update = odometer.set_value(3);
        assert!(matches!(
            change_for(&update, 0),
            Change::Rolled { offset, .. } if (offset - 40.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn float_trend_compares_numerically() {
        assert_eq!(trend(Value::Float(1.5), Value::Integer(2)), Direction::Up);
        assert_eq!(trend(Value::Integer(3), Value::Float(2.5)), Direction::Down);
        assert_eq!(trend(Value::Integer(3), Value::Float(f64::NAN)), Direction::Still);
    }

    #[test]
    fn style_hint_passes_through() {
        let odometer = OdometerValue::new(OdometerOptions {
            style: Some("accent".into()),
            ..OdometerOptions::default()
        });
        assert_eq!(odometer.style(), Some("accent"));
    }
}
