//! # odometer-tui
//!
//! Interactive terminal odometer using ratatui with Elm architecture.

pub mod count_panel;
pub mod feed;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod probe;
pub mod styles;
pub mod widget;

pub use feed::{spawn_feed, FeedHandle, ValueFeed};
pub use logs::{EntryKind, EventLog, LogEntry};
pub use messages::TuiMessage;
pub use model::TuiApp;
pub use probe::TerminalProbe;
pub use styles::{ColorTheme, ThemeName};
