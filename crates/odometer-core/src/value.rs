//! Displayed values and their per-position character sequences.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OdometerError;

/// A number supplied to the odometer for one render cycle.
///
/// Integers keep full precision; floats use Rust's shortest round-trip
/// formatting, so `NaN` and `inf` come through as literal characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i128),
    Float(f64),
}

impl Default for Value {
    fn default() -> Self {
        Self::Integer(0)
    }
}

impl Value {
    /// The value as a float, lossy for very large integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Whether the value is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Integer(_) => true,
            Self::Float(f) => f.is_finite(),
        }
    }

    /// Add an integer step, saturating at the integer bounds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn step(self, delta: i64) -> Self {
        match self {
            Self::Integer(i) => Self::Integer(i.saturating_add(i128::from(delta))),
            Self::Float(f) => Self::Float(f + delta as f64),
        }
    }
}

/// Accepts JSON integers, floats, and numeric strings (`"NaN"`, `"1e3"`).
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl Visitor<'_> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Integer(i128::from(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                Ok(Value::Integer(i128::from(v)))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
                Ok(Value::Integer(v))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
                Ok(i128::try_from(v).map_or(Value::Float(v as f64), Value::Integer))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(i) => write!(f, "{i}"),
            // Negative zero displays as "0".
            Self::Float(v) if v == 0.0 => f.write_str("0"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for Value {
    type Err = OdometerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i128>() {
            return Ok(Self::Integer(i));
        }
        s.parse::<f64>()
            .map(Self::Float)
            .map_err(|_| OdometerError::InvalidValue(s.to_string()))
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Integer(i128::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

/// Parse a comma-separated list of values, e.g. `"5, 99, 100"`.
///
/// # Errors
///
/// Returns [`OdometerError::InvalidValue`] for the first entry that is not a
/// number.
pub fn parse_list(s: &str) -> Result<Vec<Value>, OdometerError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Value::from_str)
        .collect()
}

/// How position keys are assigned to the characters of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Key by place value: the last character is always position 0.
    #[default]
    Right,
    /// Key by string index: the first character is always position 0.
    Left,
}

impl FromStr for Alignment {
    type Err = OdometerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            other => Err(OdometerError::Config(format!(
                "unknown alignment {other:?} (expected left or right)"
            ))),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => f.write_str("right"),
            Self::Left => f.write_str("left"),
        }
    }
}

/// The ordered characters of a value's display string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterSequence {
    chars: Vec<char>,
}

impl CharacterSequence {
    /// Split a value into its display characters.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            chars: value.to_string().chars().collect(),
        }
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters, most significant first.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Stable position key for the character at string index `index`.
    #[must_use]
    pub fn key_of(&self, index: usize, alignment: Alignment) -> usize {
        match alignment {
            Alignment::Left => index,
            Alignment::Right => self.chars.len().saturating_sub(index + 1),
        }
    }

    /// `(key, char)` pairs in display order.
    pub fn keyed(&self, alignment: Alignment) -> impl Iterator<Item = (usize, char)> + '_ {
        self.chars
            .iter()
            .enumerate()
            .map(move |(i, &c)| (self.key_of(i, alignment), c))
    }
}

impl fmt::Display for CharacterSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
