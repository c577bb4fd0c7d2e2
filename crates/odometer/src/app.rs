//! Application entry point and dispatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use odometer_cli::presenter::{CliPresenter, TransitionPresenter};
use odometer_cli::ui::print_header;
use odometer_core::{CountUp, CountUpOptions, OdometerValue};
use odometer_tui::{spawn_feed, ColorTheme, TuiApp, TuiMessage, ValueFeed};

use crate::config::{AppConfig, Settings};
use crate::errors::AppError;
use crate::version::full_version;

/// Simulated frame length of headless runs (~30 fps).
pub const FRAME: Duration = Duration::from_millis(33);

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        odometer_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let settings = config.resolve()?;

    if config.tui {
        return run_tui(settings);
    }

    if settings.verbose && !settings.quiet {
        print_header(&full_version());
    }

    let cancel = Arc::new(AtomicBool::new(false));
    ctrlc_handler(Arc::clone(&cancel))?;

    let mut presenter = CliPresenter::stdout(settings.verbose, settings.quiet);
    match settings.count_up.clone() {
        Some(opts) => present_count_up(&settings, opts, &mut presenter, &cancel),
        None => present_values(&settings, &mut presenter, &cancel).map(|_| ()),
    }
}

/// Apply each value in turn, simulate frames until it settles, and report.
///
/// Returns the odometer in its final state.
pub fn present_values(
    settings: &Settings,
    presenter: &mut dyn TransitionPresenter,
    cancel: &AtomicBool,
) -> Result<OdometerValue> {
    let mut odometer = OdometerValue::new(settings.odometer.clone());
    for &value in &settings.values {
        if cancel.load(Ordering::Relaxed) {
            return Err(AppError::Cancelled.into());
        }
        let update = odometer.set_value(value);
        presenter.present_update(&update, &odometer)?;
        let frames = run_frames(&mut odometer, cancel)?;
        tracing::debug!(%value, frames, "value settled");
        presenter.present_settled(&odometer.displayed_text())?;
    }
    Ok(odometer)
}

/// Run a count-up to completion, reporting changed frames.
///
/// A headless run is treated as fully visible, so it starts immediately.
pub fn present_count_up(
    settings: &Settings,
    opts: CountUpOptions,
    presenter: &mut dyn TransitionPresenter,
    cancel: &AtomicBool,
) -> Result<()> {
    let mut count_up = CountUp::new(opts)?;
    count_up.on_visibility(1.0);
    let mut odometer = settings
        .drive
        .then(|| OdometerValue::new(settings.odometer.clone()));

    let mut elapsed = Duration::ZERO;
    while !count_up.is_complete() {
        if cancel.load(Ordering::Relaxed) {
            return Err(AppError::Cancelled.into());
        }
        elapsed += FRAME;
        if count_up.tick(FRAME).is_none() {
            continue;
        }
        presenter.present_count_frame(elapsed, &count_up.display_text())?;
        if let Some(odometer) = odometer.as_mut() {
            odometer.set_value(count_up.value());
            odometer.tick(FRAME);
        }
    }
    presenter.present_count_done(&count_up.display_text(), elapsed)?;

    if let Some(mut odometer) = odometer {
        run_frames(&mut odometer, cancel)?;
        presenter.present_settled(&odometer.displayed_text())?;
    }
    Ok(())
}

fn run_frames(odometer: &mut OdometerValue, cancel: &AtomicBool) -> Result<u32> {
    let mut frames = 0;
    while !odometer.is_settled() {
        if cancel.load(Ordering::Relaxed) {
            return Err(AppError::Cancelled.into());
        }
        odometer.tick(FRAME);
        frames += 1;
    }
    Ok(frames)
}

fn run_tui(settings: Settings) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded::<TuiMessage>();

    let mut app = TuiApp::new(
        rx,
        settings.odometer.clone(),
        ColorTheme::from_name(settings.theme),
    );
    if let Some(opts) = settings.count_up {
        app = app.with_count_up(CountUp::new(opts)?, settings.drive);
    }

    let mut feed = ValueFeed::new(settings.values, settings.interval);
    if settings.repeat {
        feed = feed.repeating();
    }
    app.attach_feed(spawn_feed(feed, tx));

    // Run TUI event loop on the main thread
    let result = app.run();
    if let Some(feed) = app.take_feed() {
        feed.join();
    }
    result.map_err(AppError::from)?;
    Ok(())
}

fn ctrlc_handler(cancel: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        cancel.store(true, Ordering::Relaxed);
    })
    .context("cannot install Ctrl+C handler")
}
