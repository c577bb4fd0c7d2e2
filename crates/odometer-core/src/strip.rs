//! Per-position digit strip math.
//!
//! A numeric position is drawn as a vertical strip `0..=9` with the current
//! digit in the visible cell. When the digit changes the strip is placed at a
//! signed pixel offset and tweened back to zero, so the roll passes over every
//! intermediate digit. Distance is linear in digit space: `9 -> 0` travels nine
//! cells, not one.

use std::ops::Range;

use crate::constants::STRIP_LEN;

/// Digit value of an ASCII decimal character.
#[must_use]
pub fn digit_value(c: char) -> Option<u8> {
    c.to_digit(10).and_then(|d| u8::try_from(d).ok())
}

/// Direction a strip rolls while it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Incrementing: the strip moves up toward its rest position.
    Up,
    /// Decrementing: the strip moves down toward its rest position.
    Down,
    /// No digit change, or a non-digit on either side.
    Still,
}

impl Direction {
    /// `+1`, `-1`, or `0`.
    #[must_use]
    pub fn signum(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Still => 0,
        }
    }
}

/// The glyph bands mounted around the visible digit.
///
/// `below` holds `0..current` (stacked above the visible cell), `above` holds
/// `current+1..=9` (stacked under it). Together with `current` they cover
/// every digit exactly once, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripWindow {
    current: u8,
}

impl StripWindow {
    /// Window centred on `current`. Values above 9 are clamped.
    #[must_use]
    pub fn new(current: u8) -> Self {
        Self {
            current: current.min(STRIP_LEN - 1),
        }
    }

    /// Digits stacked before the visible one.
    #[must_use]
    pub fn below(&self) -> Range<u8> {
        0..self.current
    }

    /// The visible digit.
    #[must_use]
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Digits stacked after the visible one.
    #[must_use]
    pub fn above(&self) -> Range<u8> {
        self.current + 1..STRIP_LEN
    }

    /// Whole strip in render order.
    pub fn digits(&self) -> impl Iterator<Item = u8> {
        self.below()
            .chain(std::iter::once(self.current))
            .chain(self.above())
    }

    /// Glyph at strip index `index`, if it lies on the strip.
    #[must_use]
    pub fn glyph_at(&self, index: i32) -> Option<char> {
        let index = u8::try_from(index).ok().filter(|&i| i < STRIP_LEN)?;
        char::from_digit(u32::from(index), 10)
    }
}

/// Strip state for one position between two characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitStrip {
    previous: char,
    current: char,
    cell_height: f64,
}

impl DigitStrip {
    #[must_use]
    pub fn new(previous: char, current: char, cell_height: f64) -> Self {
        Self {
            previous,
            current,
            cell_height,
        }
    }

    /// Character the strip is rolling from.
    #[must_use]
    pub fn previous(&self) -> char {
        self.previous
    }

    /// Character the strip is rolling to.
    #[must_use]
    pub fn current(&self) -> char {
        self.current
    }

    /// Whether the current character is drawn on a strip.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        digit_value(self.current).is_some()
    }

    /// Identity of the animated wrapper. Changes iff the character does.
    #[must_use]
    pub fn animation_key(&self) -> char {
        self.current
    }

    /// Signed digit distance `current - previous`, when both are digits.
    #[must_use]
    pub fn steps(&self) -> Option<i32> {
        let p = digit_value(self.previous)?;
        let c = digit_value(self.current)?;
        Some(i32::from(c) - i32::from(p))
    }

    /// Roll direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self.steps() {
            Some(s) if s > 0 => Direction::Up,
            Some(s) if s < 0 => Direction::Down,
            _ => Direction::Still,
        }
    }

    /// Initial pixel offset: `-cell_height * (previous - current)`.
    #[must_use]
    pub fn offset(&self) -> f64 {
        if self.previous == self.current {
            return 0.0;
        }
        match self.steps() {
            Some(steps) => -self.cell_height * f64::from(-steps),
            None => 0.0,
        }
    }

    /// Glyph window, for numeric positions.
    #[must_use]
    pub fn window(&self) -> Option<StripWindow> {
        digit_value(self.current).map(StripWindow::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_values() {
        assert_eq!(digit_value('0'), Some(0));
        assert_eq!(digit_value('9'), Some(9));
        assert_eq!(digit_value('-'), None);
        assert_eq!(digit_value('٣'), None);
    }

    #[test]
    fn unchanged_digit_has_no_offset() {
        let strip = DigitStrip::new('4', '4', 48.0);
        assert!(strip.offset().abs() < f64::EPSILON);
        assert_eq!(strip.direction(), Direction::Still);
    }

    #[test]
    fn offset_scales_with_distance() {
        let strip = DigitStrip::new('3', '9', 48.0);
        assert!((strip.offset() - 288.0).abs() < f64::EPSILON);
        assert_eq!(strip.direction(), Direction::Up);

        let strip = DigitStrip::new('1', '2', 48.0);
        assert!((strip.offset() - 48.0).abs() < f64::EPSILON);
        assert_eq!(strip.direction(), Direction::Up);
    }

    #[test]
    fn decrement_has_negative_offset() {
        let strip = DigitStrip::new('9', '0', 10.0);
        assert!((strip.offset() + 90.0).abs() < f64::EPSILON);
        assert_eq!(strip.direction(), Direction::Down);
        assert_eq!(strip.direction().signum(), -1);
    }

    #[test]
    fn non_numeric_current() {
        let strip = DigitStrip::new('5', '-', 48.0);
        assert!(!strip.is_numeric());
        assert!(strip.window().is_none());
        assert!(strip.offset().abs() < f64::EPSILON);
    }

    #[test]
    fn non_numeric_previous_is_still() {
        let strip = DigitStrip::new('-', '5', 48.0);
        assert!(strip.is_numeric());
        assert_eq!(strip.direction(), Direction::Still);
        assert!(strip.offset().abs() < f64::EPSILON);
    }

    #[test]
    fn window_bands() {
        let window = StripWindow::new(3);
        assert_eq!(window.below().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(window.current(), 3);
        assert_eq!(window.above().collect::<Vec<_>>(), vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn window_edges() {
        assert_eq!(StripWindow::new(0).below().count(), 0);
        assert_eq!(StripWindow::new(9).above().count(), 0);
        assert_eq!(StripWindow::new(12).current(), 9);
    }

    #[test]
    fn glyph_lookup() {
        let window = StripWindow::new(5);
        assert_eq!(window.glyph_at(0), Some('0'));
        assert_eq!(window.glyph_at(9), Some('9'));
        assert_eq!(window.glyph_at(-1), None);
        assert_eq!(window.glyph_at(10), None);
    }

    #[test]
    fn animation_key_follows_character() {
        assert_eq!(DigitStrip::new('1', '2', 48.0).animation_key(), '2');
        assert_eq!(DigitStrip::new('2', '2', 48.0).animation_key(), '2');
    }
}
