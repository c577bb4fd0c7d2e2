//! Golden scenario support for the workspace integration tests.
//!
//! Scenarios live in `tests/testdata/odometer_scenarios.json`. Each one feeds a
//! sequence of values to a fresh odometer and lists the per-position changes
//! every value must produce.

use std::path::Path;

use serde::Deserialize;

use odometer_core::{Change, Direction, OdometerError, Update, Value};

#[derive(Debug, Deserialize)]
pub struct ScenarioFile {
    pub description: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub cell_height: Option<f64>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub value: Value,
    pub trend: ExpectedTrend,
    pub changes: Vec<ExpectedChange>,
    /// Text once every transition has settled.
    pub settled: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedTrend {
    Up,
    Down,
    Still,
}

impl From<Direction> for ExpectedTrend {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Still => Self::Still,
        }
    }
}

/// One expected entry of [`Update::changes`], in order.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExpectedChange {
    Mounted { key: usize, character: char },
    Rolled {
        key: usize,
        from: char,
        to: char,
        offset_magnitude: f64,
    },
    Faded { key: usize, from: char, to: char },
    Snapped { key: usize, character: char },
    Unchanged { key: usize, character: char },
    Unmounted { key: usize, character: char },
}

impl ExpectedChange {
    /// Whether `actual` is the change this entry describes.
    #[must_use]
    pub fn matches(&self, actual: &Change) -> bool {
        match (self, actual) {
            (
                Self::Mounted { key, character },
                Change::Mounted {
                    key: k,
                    character: c,
                },
            )
            | (
                Self::Snapped { key, character },
                Change::Snapped {
                    key: k,
                    character: c,
                },
            )
            | (
                Self::Unchanged { key, character },
                Change::Unchanged {
                    key: k,
                    character: c,
                },
            )
            | (
                Self::Unmounted { key, character },
                Change::Unmounted {
                    key: k,
                    character: c,
                },
            ) => key == k && character == c,
            (
                Self::Rolled {
                    key,
                    from,
                    to,
                    offset_magnitude,
                },
                Change::Rolled {
                    key: k,
                    from: f,
                    to: t,
                    offset,
                    ..
                },
            ) => key == k && from == f && to == t && (offset.abs() - offset_magnitude).abs() < 1e-9,
            (
                Self::Faded { key, from, to },
                Change::Faded {
                    key: k,
                    from: f,
                    to: t,
                },
            ) => key == k && from == f && to == t,
            _ => false,
        }
    }
}

/// Compare an update against a step. Returns a description of the first
/// mismatch.
pub fn check_update(step: &Step, update: &Update) -> Result<(), String> {
    let trend = ExpectedTrend::from(update.trend);
    if trend != step.trend {
        return Err(format!("trend {trend:?}, expected {:?}", step.trend));
    }
    if update.changes.len() != step.changes.len() {
        return Err(format!(
            "{} changes, expected {}: {:?}",
            update.changes.len(),
            step.changes.len(),
            update.changes
        ));
    }
    for (expected, actual) in step.changes.iter().zip(&update.changes) {
        if !expected.matches(actual) {
            return Err(format!("got {actual}, expected {expected:?}"));
        }
    }
    Ok(())
}

/// Load a scenario file.
pub fn load(path: &Path) -> Result<ScenarioFile, OdometerError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| OdometerError::Config(format!("cannot read {}: {e}", path.display())))?;
    Ok(serde_json::from_str(&text)?)
}
