//! Event log of odometer transitions.
//!
//! A bounded ring of entries with a viewport that follows the newest entry
//! until the user scrolls away from the tail.

use std::collections::VecDeque;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Most entries kept in the log.
pub const MAX_LOG_ENTRIES: usize = 500;

/// What produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A new value was applied.
    Value,
    /// One position moved.
    Change,
    /// Feed and count-up lifecycle.
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub text: String,
}

/// Bounded event log with a scrollable viewport.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    /// First visible entry while not following.
    top: usize,
    follow: bool,
    /// Rows the viewport shows.
    page: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(MAX_LOG_ENTRIES)
    }
}

impl EventLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
            top: 0,
            follow: true,
            page: 10,
        }
    }

    /// Append an entry, dropping the oldest past capacity.
    pub fn push(&mut self, kind: EntryKind, text: impl Into<String>) {
        self.entries.push_back(LogEntry {
            kind,
            text: text.into(),
        });
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.top = self.top.saturating_sub(1);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Text of entries of `kind`, oldest first.
    pub fn texts(&self, kind: EntryKind) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.text.as_str())
    }

    /// Whether the viewport is pinned to the newest entry.
    #[must_use]
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Set how many rows the viewport shows.
    pub fn set_page(&mut self, rows: usize) {
        self.page = rows.max(1);
    }

    fn max_top(&self) -> usize {
        self.entries.len().saturating_sub(self.page)
    }

    /// Index of the first visible entry.
    #[must_use]
    pub fn first_visible(&self) -> usize {
        if self.follow {
            self.max_top()
        } else {
            self.top.min(self.max_top())
        }
    }

    /// Move the viewport by `delta` entries. Scrolling up stops following;
    /// reaching the tail resumes it.
    pub fn scroll_by(&mut self, delta: isize) {
        let current = self.first_visible();
        let max = self.max_top();
        let target = current.saturating_add_signed(delta).min(max);
        self.top = target;
        self.follow = (delta > 0 && target >= max) || (self.follow && delta >= 0);
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-isize::try_from(self.page).unwrap_or(isize::MAX));
    }

    pub fn page_down(&mut self) {
        self.scroll_by(isize::try_from(self.page).unwrap_or(isize::MAX));
    }

    pub fn home(&mut self) {
        self.follow = false;
        self.top = 0;
    }

    pub fn end(&mut self) {
        self.follow = true;
    }
}

fn entry_style(kind: EntryKind, theme: &ColorTheme) -> Style {
    match kind {
        EntryKind::Value => theme.text_style().add_modifier(Modifier::BOLD),
        EntryKind::Change => theme.muted_style(),
        EntryKind::Note => Style::default().fg(theme.secondary),
    }
}

/// Render the event log.
pub fn render_event_log(frame: &mut Frame, area: Rect, log: &EventLog, theme: &ColorTheme) {
    let rows = area.height.saturating_sub(2) as usize;
    let first = if log.is_following() {
        log.len().saturating_sub(rows)
    } else {
        log.first_visible()
    };
    let items: Vec<ListItem> = log
        .entries()
        .skip(first)
        .take(rows)
        .map(|e| ListItem::new(Line::raw(e.text.as_str())).style(entry_style(e.kind, theme)))
        .collect();

    let title = if log.is_following() {
        " Events ".to_string()
    } else {
        format!(" Events ({}/{}) ", first + 1, log.len())
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style()),
    );
    frame.render_widget(list, area);
}
