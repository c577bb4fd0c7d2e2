//! Odometer dashboard state, update and view.

use std::io;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event::DisableMouseCapture, event::EnableMouseCapture, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;

use odometer_core::{Change, CountUp, LayoutProbe, OdometerOptions, OdometerValue, Value};

use crate::count_panel::render_count_up;
use crate::feed::FeedHandle;
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_event_log, EntryKind, EventLog};
use crate::messages::TuiMessage;
use crate::probe::TerminalProbe;
use crate::styles::ColorTheme;
use crate::widget::render_odometer;

/// Rows the count-up panel wants; fewer rows means it is partly hidden.
pub const COUNT_PANEL_HEIGHT: u16 = 5;

/// Frame interval of the event loop (~30 fps).
const FRAME: Duration = Duration::from_millis(33);

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub header: Rect,
    pub odometer: Rect,
    pub count_up: Option<Rect>,
    pub logs: Option<Rect>,
    pub footer: Rect,
}

/// Dashboard state. Feed and terminal events arrive as [`TuiMessage`]s.
pub struct TuiApp {
    /// Set once quit was requested.
    pub should_quit: bool,
    /// Whether animation and the feed are paused.
    pub paused: bool,
    /// The odometer being shown.
    pub odometer: OdometerValue,
    /// Optional count-up display.
    pub count_up: Option<CountUp>,
    /// Whether the count-up feeds its frames into the odometer.
    pub drive_odometer: bool,
    /// Transition and lifecycle events.
    pub log: EventLog,
    /// Event log pane visible.
    pub show_logs: bool,
    /// Show count-up toggle.
    pub show_count_up: bool,
    pub terminal_width: u16,
    pub terminal_height: u16,
    theme: ColorTheme,
    rx: Receiver<TuiMessage>,
    feed: Option<FeedHandle>,
    count_up_reported: bool,
    measure_pending: bool,
}

impl TuiApp {
    /// Dashboard fed from `rx`, with an empty odometer.
    #[must_use]
    pub fn new(rx: Receiver<TuiMessage>, options: OdometerOptions, theme: ColorTheme) -> Self {
        let mut app = Self {
            should_quit: false,
            paused: false,
            odometer: OdometerValue::new(options),
            count_up: None,
            drive_odometer: false,
            log: EventLog::default(),
            show_logs: true,
            show_count_up: false,
            terminal_width: 80,
            terminal_height: 24,
            theme,
            rx,
            feed: None,
            count_up_reported: false,
            measure_pending: true,
        };
        app.resize(app.terminal_width, app.terminal_height);
        app
    }

    /// Attach a count-up panel. With `drive_odometer`, every count-up frame is
    /// also applied to the odometer.
    #[must_use]
    pub fn with_count_up(mut self, count_up: CountUp, drive_odometer: bool) -> Self {
        self.count_up = Some(count_up);
        self.drive_odometer = drive_odometer;
        self.show_count_up = true;
        self
    }

    /// Hand over the feed so pause and quit reach it.
    pub fn attach_feed(&mut self, feed: FeedHandle) {
        self.feed = Some(feed);
    }

    /// Take the feed back, e.g. to join it after the loop ends.
    pub fn take_feed(&mut self) -> Option<FeedHandle> {
        self.feed.take()
    }

    /// Drain pending messages without blocking.
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Value(value) => self.apply_value(value),
            TuiMessage::Started => self.log.push(EntryKind::Note, "feed started"),
            TuiMessage::Finished => self.log.push(EntryKind::Note, "feed finished"),
            TuiMessage::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Apply a mapped key.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit | KeyAction::Cancel => self.quit(),
            KeyAction::Increment => self.step(1),
            KeyAction::Decrement => self.step(-1),
            KeyAction::IncrementTen => self.step(10),
            KeyAction::DecrementTen => self.step(-10),
            KeyAction::Pause => self.set_paused(true),
            KeyAction::Resume => self.set_paused(false),
            KeyAction::ToggleLogs => self.show_logs = !self.show_logs,
            KeyAction::ToggleCountUp => {
                if self.count_up.is_some() {
                    self.show_count_up = !self.show_count_up;
                }
            }
            KeyAction::ScrollUp => self.log.scroll_by(-1),
            KeyAction::ScrollDown => self.log.scroll_by(1),
            KeyAction::PageUp => self.log.page_up(),
            KeyAction::PageDown => self.log.page_down(),
            KeyAction::Home => self.log.home(),
            KeyAction::End => self.log.end(),
            KeyAction::None => {}
        }
    }

    /// Apply a value to the odometer and log what moved.
    pub fn apply_value(&mut self, value: Value) {
        let update = self.odometer.set_value(value);
        self.measure_pending = true;
        if update.is_noop() {
            return;
        }
        let previous = update
            .previous
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        self.log.push(
            EntryKind::Value,
            format!("{previous} -> {} ({:?})", update.value, update.trend),
        );
        for change in &update.changes {
            if !matches!(change, Change::Unchanged { .. }) {
                self.log.push(EntryKind::Change, format!("  {change}"));
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        let area = Rect::new(0, 0, width, height);
        if let Some(logs) = self.layout(area).logs {
            self.log.set_page(usize::from(logs.height.saturating_sub(2)));
        }
    }

    fn step(&mut self, delta: i64) {
        let next = self.odometer.value().step(delta);
        self.apply_value(next);
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if let Some(feed) = &self.feed {
            feed.set_paused(paused);
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        if let Some(feed) = &self.feed {
            feed.stop();
        }
    }

    /// Advance every animation by `dt`. Nothing moves while paused.
    pub fn advance(&mut self, dt: Duration) {
        if self.paused {
            return;
        }
        self.odometer.tick(dt);

        let visibility = self.count_up_visibility();
        let Some(count_up) = self.count_up.as_mut() else {
            return;
        };
        if count_up.on_visibility(visibility) {
            tracing::debug!(visibility, "count-up visible");
        }
        if count_up.tick(dt).is_some() && self.drive_odometer {
            let value = count_up.value();
            self.odometer.set_value(value);
            self.measure_pending = true;
        }
        if count_up.is_complete() && !self.count_up_reported {
            self.count_up_reported = true;
            let text = count_up.display_text();
            self.log.push(EntryKind::Note, format!("count-up reached {text}"));
        }
    }

    /// Fraction of the count-up panel on screen at the current terminal size.
    #[must_use]
    pub fn count_up_visibility(&self) -> f64 {
        let area = Rect::new(0, 0, self.terminal_width, self.terminal_height);
        self.layout(area)
            .count_up
            .map_or(0.0, |r| f64::from(r.height.min(COUNT_PANEL_HEIGHT)) / f64::from(COUNT_PANEL_HEIGHT))
    }

    /// Measure glyph cells of newly mounted positions.
    pub fn measure(&mut self, probe: &dyn LayoutProbe) {
        if self.measure_pending {
            self.odometer.measure(probe);
            self.measure_pending = false;
        }
    }

    fn layout(&self, area: Rect) -> Panes {
        Self::compute_layout(
            area,
            self.show_count_up && self.count_up.is_some(),
            self.show_logs,
        )
    }

    /// Compute the screen layout.
    ///
    /// Header and footer are fixed; the body is split 60/40 between the
    /// odometer column and the event log when logs are shown.
    #[must_use]
    pub fn compute_layout(area: Rect, show_count_up: bool, show_logs: bool) -> Panes {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Min(3),    // main content
                Constraint::Length(2), // footer
            ])
            .split(area);

        let (main, logs) = if show_logs {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(outer[1]);
            (cols[0], Some(cols[1]))
        } else {
            (outer[1], None)
        };

        let (odometer, count_up) = if show_count_up {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(3),
                    Constraint::Length(COUNT_PANEL_HEIGHT),
                ])
                .split(main);
            (rows[0], Some(rows[1]))
        } else {
            (main, None)
        };

        Panes {
            header: outer[0],
            odometer,
            count_up,
            logs,
            footer: outer[2],
        }
    }

    /// Draw every visible pane.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let panes = self.layout(frame.area());

        render_header(
            frame,
            panes.header,
            self.odometer.value(),
            self.odometer.options().alignment,
            self.paused,
            &self.theme,
        );
        render_odometer(frame, panes.odometer, &self.odometer, &self.theme);
        if let (Some(area), Some(count_up)) = (panes.count_up, self.count_up.as_ref()) {
            render_count_up(frame, area, count_up, &self.theme);
        }
        if let Some(area) = panes.logs {
            render_event_log(frame, area, &self.log, &self.theme);
        }
        render_footer(frame, panes.footer, &self.theme);
    }

    /// Enter raw mode on the alternate screen.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Leave raw mode and restore the cursor.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run until quit.
    ///
    /// Each iteration draws, measures new glyph cells, polls input for the
    /// remainder of the frame, drains the channel, and advances animations
    /// by the real time elapsed.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let size = terminal.size()?;
        self.resize(size.width, size.height);

        let probe = TerminalProbe;
        let mut last = Instant::now();
        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }
            self.measure(&probe);

            if self.should_quit {
                break Ok(());
            }

            let timeout = FRAME.saturating_sub(last.elapsed());
            match event::poll(timeout) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key_event)) => self.handle_key_action(map_key(key_event)),
                    Ok(Event::Resize(w, h)) => {
                        self.handle_message(TuiMessage::Resize {
                            width: w,
                            height: h,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            self.update();
            let now = Instant::now();
            self.advance(now - last);
            last = now;
        };

        Self::teardown_terminal(&mut terminal)?;
        result
    }
}
