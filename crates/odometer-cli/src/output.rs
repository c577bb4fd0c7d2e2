//! CLI output formatting.

use std::ops::Range;
use std::time::Duration;

use odometer_core::{Change, Direction, StripWindow, Update};

/// Format a duration for display.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{secs:.2}s")
    }
}

/// Format a pixel offset with an explicit sign.
#[must_use]
pub fn format_offset(px: f64) -> String {
    if px == 0.0 {
        "0px".to_string()
    } else {
        format!("{px:+.0}px")
    }
}

#[must_use]
pub fn format_direction(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Still => "still",
    }
}

fn format_band(band: Range<u8>) -> String {
    match (band.start, band.end) {
        (s, e) if s >= e => "[]".to_string(),
        (s, e) if e - s == 1 => format!("[{s}]"),
        (s, e) => format!("[{s}-{}]", e - 1),
    }
}

/// Format a strip window as `below current above`, e.g. `[0-4] 5 [6-9]`.
#[must_use]
pub fn format_window(window: &StripWindow) -> String {
    format!(
        "{} {} {}",
        format_band(window.below()),
        window.current(),
        format_band(window.above())
    )
}

/// Headline of an update: `previous -> value (trend)`.
#[must_use]
pub fn format_update_header(update: &Update) -> String {
    let previous = update
        .previous
        .map_or_else(|| "-".to_string(), |v| v.to_string());
    format!(
        "{previous} -> {} ({})",
        update.value,
        format_direction(update.trend)
    )
}

/// Lines for every position that moves. Unchanged positions are skipped.
#[must_use]
pub fn format_changes(update: &Update) -> Vec<String> {
    update
        .changes
        .iter()
        .filter(|c| !matches!(c, Change::Unchanged { .. }))
        .map(ToString::to_string)
        .collect()
}

/// One count-up frame: `[  33ms] 12`.
#[must_use]
pub fn format_count_frame(elapsed: Duration, text: &str) -> String {
    format!("[{:>6}] {text}", format_duration(elapsed))
}
