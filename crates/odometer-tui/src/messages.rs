//! Messages consumed by [`TuiApp::update`](crate::TuiApp::update).

use odometer_core::Value;

/// Everything that can change the model from outside the key map: the feed
/// thread and terminal resizes.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Next value to roll to.
    Value(Value),
    /// The feed began sending values.
    Started,
    /// The feed ran out of values.
    Finished,
    Resize { width: u16, height: u16 },
}
