//! Console styling for CLI messages.
//!
//! Colors are dropped when `NO_COLOR` is set.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Banner line for the start of a headless run.
#[must_use]
pub fn banner(text: &str, plain: bool) -> String {
    if plain {
        format!("== {text} ==")
    } else {
        style(format!("== {text} ==")).bold().cyan().to_string()
    }
}

/// Error line for stderr.
#[must_use]
pub fn error_line(text: &str, plain: bool) -> String {
    if plain {
        format!("[ERROR] {text}")
    } else {
        format!("{} {text}", style("[ERROR]").red().bold())
    }
}

/// Print a styled header.
pub fn print_header(text: &str) {
    println!("{}", banner(text, is_color_disabled()));
}

/// Print an error message.
pub fn print_error(text: &str) {
    eprintln!("{}", error_line(text, is_color_disabled()));
}
