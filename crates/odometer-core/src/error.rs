//! Error type for odometer configuration.
//!
//! Rendering itself never fails: non-digit characters fall back to a literal
//! glyph and unmeasured cells use a fallback height. Only configuration that
//! cannot produce a sensible animation is rejected.

use crate::constants::{exit_codes, MAX_DECIMALS};

/// Error type for odometer configuration and input parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OdometerError {
    /// A duration that is negative, non-finite, or otherwise unusable.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// A cell height that is not a positive finite number.
    #[error("invalid cell height: {0}")]
    InvalidCellHeight(f64),

    /// More decimal places than can be formatted.
    #[error("invalid decimals: {0} (maximum is {MAX_DECIMALS})")]
    InvalidDecimals(u32),

    /// A value that could not be parsed as a number.
    #[error("invalid value: {0:?}")]
    InvalidValue(String),

    /// Configuration file or option error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl OdometerError {
    /// Exit code the binary reports for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidValue(_) => exit_codes::ERROR_GENERIC,
            Self::InvalidDuration(_)
            | Self::InvalidCellHeight(_)
            | Self::InvalidDecimals(_)
            | Self::Config(_) => exit_codes::ERROR_CONFIG,
        }
    }
}

impl From<serde_json::Error> for OdometerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            OdometerError::InvalidCellHeight(-1.0).to_string(),
            "invalid cell height: -1"
        );
        assert_eq!(
            OdometerError::InvalidDecimals(30).to_string(),
            "invalid decimals: 30 (maximum is 20)"
        );
        assert_eq!(
            OdometerError::InvalidValue("abc".into()).to_string(),
            "invalid value: \"abc\""
        );
    }

    #[test]
    fn exit_codes_by_kind() {
        assert_eq!(OdometerError::InvalidValue("x".into()).exit_code(), 1);
        assert_eq!(OdometerError::Config("bad".into()).exit_code(), 4);
        assert_eq!(OdometerError::InvalidDecimals(99).exit_code(), 4);
    }

    #[test]
    fn from_json_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let converted: OdometerError = err.into();
        assert!(matches!(converted, OdometerError::Config(_)));
    }
}
