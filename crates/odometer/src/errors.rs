//! Error handling and exit codes.

use odometer_core::constants::exit_codes;
use odometer_core::OdometerError;

/// Failures that belong to the application rather than the odometer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("interrupted")]
    Cancelled,
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Exit code for an odometer error.
#[must_use]
pub fn handle_error(err: &OdometerError) -> i32 {
    err.exit_code()
}

/// Exit code for any error that reached `main`.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<OdometerError>() {
            return handle_error(e);
        }
        if let Some(AppError::Cancelled) = cause.downcast_ref::<AppError>() {
            return exit_codes::ERROR_CANCELED;
        }
    }
    exit_codes::ERROR_GENERIC
}
