//! Background value feed.
//!
//! A producer thread walks a list of values and sends each one to the TUI
//! over a channel. The first value goes out at once, later ones `interval`
//! apart. The handle pauses, resumes, and stops it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;

use odometer_core::Value;

use crate::messages::TuiMessage;

/// Sleep granularity while waiting, so stop and pause react quickly.
const POLL_STEP: Duration = Duration::from_millis(20);

/// Values to feed and their pacing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFeed {
    pub values: Vec<Value>,
    pub interval: Duration,
    /// Start over after the last value.
    pub repeat: bool,
}

impl ValueFeed {
    #[must_use]
    pub fn new(values: Vec<Value>, interval: Duration) -> Self {
        Self {
            values,
            interval,
            repeat: false,
        }
    }

    #[must_use]
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Control handle of a running feed.
#[derive(Debug)]
pub struct FeedHandle {
    stopped: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl FeedHandle {
    /// Ask the feed to stop after its current wait.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Stop the feed and wait for its thread.
    pub fn join(mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("value feed thread panicked");
            }
        }
    }
}

/// Spawn the producer thread.
pub fn spawn_feed(feed: ValueFeed, tx: Sender<TuiMessage>) -> FeedHandle {
    let stopped = Arc::new(AtomicBool::new(false));
    let paused = Arc::new(AtomicBool::new(false));
    let thread = {
        let stopped = Arc::clone(&stopped);
        let paused = Arc::clone(&paused);
        thread::spawn(move || run_feed(&feed, &tx, &stopped, &paused))
    };
    FeedHandle {
        stopped,
        paused,
        thread: Some(thread),
    }
}

fn run_feed(feed: &ValueFeed, tx: &Sender<TuiMessage>, stopped: &AtomicBool, paused: &AtomicBool) {
    if tx.send(TuiMessage::Started).is_err() {
        return;
    }
    let mut first = true;
    loop {
        for value in &feed.values {
            let delay = if first { Duration::ZERO } else { feed.interval };
            first = false;
            if !wait(delay, stopped, paused) {
                return;
            }
            tracing::trace!(%value, "feeding value");
            if tx.send(TuiMessage::Value(*value)).is_err() {
                return; // channel closed, TUI exited
            }
        }
        if !feed.repeat || feed.values.is_empty() {
            break;
        }
    }
    let _ = tx.send(TuiMessage::Finished);
}

/// Sleep for `total` while not paused. Returns `false` if stopped.
fn wait(total: Duration, stopped: &AtomicBool, paused: &AtomicBool) -> bool {
    let mut remaining = total;
    loop {
        if stopped.load(Ordering::Relaxed) {
            return false;
        }
        if remaining.is_zero() && !paused.load(Ordering::Relaxed) {
            return true;
        }
        let step = if paused.load(Ordering::Relaxed) {
            POLL_STEP
        } else {
            let step = remaining.min(POLL_STEP);
            remaining -= step;
            step
        };
        thread::sleep(step);
    }
}
