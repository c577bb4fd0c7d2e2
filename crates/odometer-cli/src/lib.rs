//! # odometer-cli
//!
//! Headless presentation of odometer transitions and count-ups, output
//! formatting, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod ui;

pub use presenter::{CliPresenter, TransitionPresenter};
