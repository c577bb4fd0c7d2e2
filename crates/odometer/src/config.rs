//! Application configuration from CLI flags, environment, and a JSON file.
//!
//! Precedence: CLI flag or `ODOMETER_*` variable, then the config file, then
//! built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use odometer_core::value::parse_list;
use odometer_core::{Alignment, CountUpOptions, Easing, OdometerError, OdometerOptions, Value};
use odometer_tui::ThemeName;

/// Default pause between fed values in TUI mode.
const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Rolling-digit odometer and count-up.
#[derive(Parser, Debug)]
#[command(name = "odometer", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Comma-separated values to show, in order.
    #[arg(long, env = "ODOMETER_VALUES", allow_hyphen_values = true)]
    pub values: Option<String>,

    /// Launch interactive TUI.
    #[arg(long)]
    pub tui: bool,

    /// Pause between values in TUI mode, in milliseconds.
    #[arg(long, env = "ODOMETER_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Loop over the values in TUI mode.
    #[arg(long)]
    pub repeat: bool,

    /// Run a count-up to this target.
    #[arg(long, allow_hyphen_values = true)]
    pub count_up: Option<f64>,

    /// Text before the count-up number.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text after the count-up number.
    #[arg(long)]
    pub suffix: Option<String>,

    /// Decimal places of the count-up number (0-20).
    #[arg(long)]
    pub decimals: Option<u32>,

    /// Count-up duration in milliseconds.
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Feed every count-up frame into the odometer.
    #[arg(long)]
    pub drive: bool,

    /// Fallback glyph cell height in pixels.
    #[arg(long, env = "ODOMETER_CELL_HEIGHT", allow_hyphen_values = true)]
    pub cell_height: Option<f64>,

    /// Digit-strip roll duration in milliseconds.
    #[arg(long)]
    pub strip_ms: Option<u64>,

    /// Easing of the digit-strip roll.
    #[arg(long)]
    pub easing: Option<Easing>,

    /// Position keying: right (place value) or left (string index).
    #[arg(long)]
    pub align: Option<Alignment>,

    /// Color theme of the TUI.
    #[arg(long, env = "ODOMETER_THEME")]
    pub theme: Option<ThemeName>,

    /// Style hint passed to the renderer (a color name in the TUI).
    #[arg(long)]
    pub style: Option<String>,

    /// JSON configuration file.
    #[arg(long, env = "ODOMETER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only print settled text).
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

/// Contents of a `--config` file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub values: Option<Vec<Value>>,
    pub interval_ms: Option<u64>,
    pub theme: Option<ThemeName>,
    pub odometer: OdometerOptions,
    pub count_up: Option<CountUpOptions>,
}

impl FileConfig {
    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`OdometerError::Config`] if the file cannot be read or is not
    /// valid JSON for this layout.
    pub fn load(path: &Path) -> Result<Self, OdometerError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OdometerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::info!(path = %path.display(), "config file loaded");
        Ok(config)
    }
}

/// Fully resolved, validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub values: Vec<Value>,
    pub interval: Duration,
    pub repeat: bool,
    pub theme: ThemeName,
    pub odometer: OdometerOptions,
    pub count_up: Option<CountUpOptions>,
    pub drive: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Merge flags over the config file and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an [`OdometerError`] for unreadable config, unparsable values,
    /// or options that fail validation.
    pub fn resolve(&self) -> Result<Settings, OdometerError> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        self.merge(file)
    }

    /// Apply flags on top of `file`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::resolve`].
    pub fn merge(&self, file: FileConfig) -> Result<Settings, OdometerError> {
        let values = match (&self.values, file.values) {
            (Some(list), _) => parse_list(list)?,
            (None, Some(values)) => values,
            (None, None) => Vec::new(),
        };
        let values = if values.is_empty() {
            vec![Value::default()]
        } else {
            values
        };

        let interval_ms = self
            .interval_ms
            .or(file.interval_ms)
            .unwrap_or(DEFAULT_INTERVAL_MS);
        if interval_ms == 0 {
            return Err(OdometerError::InvalidDuration(
                "interval must be at least 1ms".to_string(),
            ));
        }

        let mut odometer = file.odometer;
        if let Some(height) = self.cell_height {
            odometer.fallback_cell_height = height;
        }
        if let Some(ms) = self.strip_ms {
            odometer.strip_duration_ms = ms;
        }
        if let Some(easing) = self.easing {
            odometer.easing = easing;
        }
        if let Some(alignment) = self.align {
            odometer.alignment = alignment;
        }
        if self.style.is_some() {
            odometer.style.clone_from(&self.style);
        }
        let odometer = odometer.normalize();
        odometer.validate()?;

        let count_up = self.count_up_options(file.count_up)?;

        Ok(Settings {
            values,
            interval: Duration::from_millis(interval_ms),
            repeat: self.repeat,
            theme: self.theme.or(file.theme).unwrap_or_default(),
            odometer,
            count_up,
            drive: self.drive,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }

    fn count_up_options(
        &self,
        file: Option<CountUpOptions>,
    ) -> Result<Option<CountUpOptions>, OdometerError> {
        let mut opts = match (self.count_up, file) {
            (Some(target), Some(file)) => CountUpOptions { target, ..file },
            (Some(target), None) => CountUpOptions::to(target),
            (None, Some(file)) => file,
            (None, None) => {
                if self.prefix.is_some() || self.suffix.is_some() || self.decimals.is_some() {
                    tracing::warn!("count-up flags given without --count-up; ignoring them");
                }
                return Ok(None);
            }
        };
        if let Some(prefix) = &self.prefix {
            opts.prefix.clone_from(prefix);
        }
        if let Some(suffix) = &self.suffix {
            opts.suffix.clone_from(suffix);
        }
        if let Some(decimals) = self.decimals {
            opts.decimals = decimals;
        }
        if let Some(ms) = self.duration_ms {
            opts.duration_ms = ms;
        }
        let opts = opts.normalize();
        opts.validate()?;
        Ok(Some(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(args: &[&str]) -> AppConfig {
        let mut argv = vec!["odometer"];
        argv.extend_from_slice(args);
        AppConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let settings = config(&[]).merge(FileConfig::default()).unwrap();
        assert_eq!(settings.values, vec![Value::Integer(0)]);
        assert_eq!(settings.interval, Duration::from_millis(1000));
        assert_eq!(settings.theme, ThemeName::Dark);
        assert_eq!(settings.odometer, OdometerOptions::default());
        assert!(settings.count_up.is_none());
    }

    #[test]
    fn value_list_with_negatives() {
        let settings = config(&["--values", "-5,12,2.5"])
            .merge(FileConfig::default())
            .unwrap();
        assert_eq!(
            settings.values,
            vec![Value::Integer(-5), Value::Integer(12), Value::Float(2.5)]
        );
    }

    #[test]
    fn bad_value_is_invalid_value() {
        let err = config(&["--values", "1,two"])
            .merge(FileConfig::default())
            .unwrap_err();
        assert!(matches!(err, OdometerError::InvalidValue(_)));
    }

    #[test]
    fn odometer_flags() {
        let settings = config(&[
            "--cell-height",
            "20",
            "--strip-ms",
            "100",
            "--align",
            "left",
            "--easing",
            "linear",
            "--style",
            "green",
        ])
        .merge(FileConfig::default())
        .unwrap();
        let opts = settings.odometer;
        assert!((opts.fallback_cell_height - 20.0).abs() < f64::EPSILON);
        assert_eq!(opts.strip_duration_ms, 100);
        assert_eq!(opts.alignment, Alignment::Left);
        assert_eq!(opts.easing, Easing::Linear);
        assert_eq!(opts.style.as_deref(), Some("green"));
    }

    #[test]
    fn negative_cell_height_rejected() {
        assert_eq!(config(&["--cell-height", "-4"]).cell_height, Some(-4.0));
        let err = config(&["--cell-height", "-1"])
            .merge(FileConfig::default())
            .unwrap_err();
        assert_eq!(err, OdometerError::InvalidCellHeight(-1.0));
    }

    #[test]
    fn zero_interval_rejected() {
        let err = config(&["--interval-ms", "0"])
            .merge(FileConfig::default())
            .unwrap_err();
        assert!(matches!(err, OdometerError::InvalidDuration(_)));
    }

    #[test]
    fn count_up_flags() {
        let settings = config(&[
            "--count-up",
            "99.5",
            "--prefix",
            "$",
            "--suffix",
            "k",
            "--decimals",
            "1",
            "--duration-ms",
            "500",
        ])
        .merge(FileConfig::default())
        .unwrap();
        let opts = settings.count_up.unwrap();
        assert!((opts.target - 99.5).abs() < f64::EPSILON);
        assert_eq!(opts.prefix, "$");
        assert_eq!(opts.suffix, "k");
        assert_eq!(opts.decimals, 1);
        assert_eq!(opts.duration_ms, 500);
    }

    #[test]
    fn too_many_decimals_rejected() {
        let err = config(&["--count-up", "1", "--decimals", "21"])
            .merge(FileConfig::default())
            .unwrap_err();
        assert_eq!(err, OdometerError::InvalidDecimals(21));
    }

    #[test]
    fn file_values_and_flag_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "values": [1, 22, 333],
                "interval_ms": 250,
                "theme": "light",
                "odometer": {{ "alignment": "left", "strip_duration_ms": 50 }},
                "count_up": {{ "target": 10, "suffix": "%" }}
            }}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let settings = config(&["--config", &path]).resolve().unwrap();
        assert_eq!(settings.values.len(), 3);
        assert_eq!(settings.interval, Duration::from_millis(250));
        assert_eq!(settings.theme, ThemeName::Light);
        assert_eq!(settings.odometer.alignment, Alignment::Left);
        assert_eq!(settings.odometer.strip_duration_ms, 50);
        assert_eq!(settings.count_up.as_ref().unwrap().suffix, "%");

        let settings = config(&["--config", &path, "--values", "9", "--align", "right"])
            .resolve()
            .unwrap();
        assert_eq!(settings.values, vec![Value::Integer(9)]);
        assert_eq!(settings.odometer.alignment, Alignment::Right);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "colour": "red" }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let err = config(&["--config", &path]).resolve().unwrap_err();
        assert!(matches!(err, OdometerError::Config(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = config(&["--config", "/nonexistent/odometer.json"])
            .resolve()
            .unwrap_err();
        assert!(matches!(err, OdometerError::Config(_)));
    }
}
