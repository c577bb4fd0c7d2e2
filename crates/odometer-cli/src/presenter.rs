//! CLI transition presenter.

use std::io::{self, Write};
use std::time::Duration;

use odometer_core::{Change, OdometerValue, Update};

use crate::output::{
    format_changes, format_count_frame, format_duration, format_offset, format_update_header,
    format_window,
};

/// Sink for headless odometer and count-up output.
pub trait TransitionPresenter {
    /// An update was applied; `odometer` reflects it before any ticking.
    fn present_update(&mut self, update: &Update, odometer: &OdometerValue) -> io::Result<()>;

    /// All transitions finished on `text`.
    fn present_settled(&mut self, text: &str) -> io::Result<()>;

    /// A count-up frame changed the displayed number.
    fn present_count_frame(&mut self, elapsed: Duration, text: &str) -> io::Result<()>;

    /// The count-up reached its target.
    fn present_count_done(&mut self, text: &str, elapsed: Duration) -> io::Result<()>;
}

/// Plain-text presenter.
///
/// Quiet mode prints only settled text. Verbose mode adds the strip window of
/// every rolling position and each count-up frame.
pub struct CliPresenter<W: Write = io::Stdout> {
    out: W,
    verbose: bool,
    quiet: bool,
}

impl CliPresenter {
    /// Presenter writing to stdout.
    #[must_use]
    pub fn stdout(verbose: bool, quiet: bool) -> Self {
        Self::new(io::stdout(), verbose, quiet)
    }
}

impl<W: Write> CliPresenter<W> {
    #[must_use]
    pub fn new(out: W, verbose: bool, quiet: bool) -> Self {
        Self {
            out,
            verbose,
            quiet,
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TransitionPresenter for CliPresenter<W> {
    fn present_update(&mut self, update: &Update, odometer: &OdometerValue) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.out, "{}", format_update_header(update))?;
        if update.is_noop() {
            writeln!(self.out, "  (no motion)")?;
            return Ok(());
        }
        for line in format_changes(update) {
            writeln!(self.out, "  {line}")?;
        }
        if self.verbose {
            for change in &update.changes {
                let Change::Rolled { key, .. } = change else {
                    continue;
                };
                let Some(slot) = odometer.slot(*key) else {
                    continue;
                };
                if let Some(window) = slot.strip().window() {
                    writeln!(
                        self.out,
                        "    [{key}] window {} at {}",
                        format_window(&window),
                        format_offset(slot.offset_px())
                    )?;
                }
            }
        }
        Ok(())
    }

    fn present_settled(&mut self, text: &str) -> io::Result<()> {
        if self.quiet {
            writeln!(self.out, "{text}")
        } else {
            writeln!(self.out, "  = {text}")
        }
    }

    fn present_count_frame(&mut self, elapsed: Duration, text: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            writeln!(self.out, "{}", format_count_frame(elapsed, text))?;
        }
        Ok(())
    }

    fn present_count_done(&mut self, text: &str, elapsed: Duration) -> io::Result<()> {
        if self.quiet {
            writeln!(self.out, "{text}")
        } else {
            writeln!(
                self.out,
                "count-up: {text} after {}",
                format_duration(elapsed)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(verbose: bool, quiet: bool, values: &[i64]) -> String {
        let mut presenter = CliPresenter::new(Vec::new(), verbose, quiet);
        let mut odometer = OdometerValue::default();
        for &v in values {
            let update = odometer.set_value(v);
            presenter.present_update(&update, &odometer).unwrap();
            odometer.settle();
            presenter
                .present_settled(&odometer.displayed_text())
                .unwrap();
        }
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn quiet_prints_only_settled_text() {
        assert_eq!(run(false, true, &[0, 5, 12]), "0\n5\n12\n");
    }

    #[test]
    fn normal_report() {
        let out = run(false, false, &[0, 5]);
        assert!(out.contains("- -> 0 (still)"));
        assert!(out.contains("0 -> 5 (up)"));
        assert!(out.contains("[0] roll '0' -> '5' offset +240px (up)"));
        assert!(out.contains("  = 5"));
        assert!(!out.contains("window"));
    }

    #[test]
    fn repeat_value_reports_no_motion() {
        let out = run(false, false, &[7, 7]);
        assert!(out.contains("7 -> 7 (still)\n  (no motion)"));
    }

    #[test]
    fn verbose_shows_windows() {
        let out = run(true, false, &[3]);
        assert!(out.contains("[0] window [0-2] 3 [4-9] at +144px"));
    }

    #[test]
    fn count_up_output() {
        let mut quiet = CliPresenter::new(Vec::new(), false, true);
        quiet
            .present_count_frame(Duration::from_millis(33), "1")
            .unwrap();
        quiet
            .present_count_done("100", Duration::from_secs(2))
            .unwrap();
        assert_eq!(String::from_utf8(quiet.into_inner()).unwrap(), "100\n");

        let mut verbose = CliPresenter::new(Vec::new(), true, false);
        verbose
            .present_count_frame(Duration::from_millis(33), "1")
            .unwrap();
        verbose
            .present_count_done("100", Duration::from_secs(2))
            .unwrap();
        let out = String::from_utf8(verbose.into_inner()).unwrap();
        assert_eq!(out, "[  33ms] 1\ncount-up: 100 after 2.00s\n");
    }
}
