use std::collections::VecDeque;
use std::time::{Duration, Instant};

use alarmscope_types::{EmergencyKind, FlashCategory, FlashMessage};

/// How long a flash notification stays visible
const FLASH_TTL: Duration = Duration::from_secs(7);

/// What an open confirmation dialog does when confirmed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    ClearLog,
    Emergency(EmergencyKind),
}

/// A modal yes/no dialog gating a destructive or outward-facing action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: &'static str,
    pub body: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
    pub action: PendingAction,
}

impl ConfirmDialog {
    pub fn clear_log() -> Self {
        Self {
            title: "Clear Event Log",
            body: "Are you sure?",
            confirm_label: "Yes",
            cancel_label: "No",
            action: PendingAction::ClearLog,
        }
    }

    pub fn emergency(kind: EmergencyKind) -> Self {
        Self {
            title: kind.dialog_title(),
            body: "Are you sure?",
            confirm_label: "Yes I am",
            cancel_label: "No",
            action: PendingAction::Emergency(kind),
        }
    }
}

/// Queue of transient flash notifications, oldest first
pub struct FlashQueue {
    entries: VecDeque<(FlashMessage, Instant)>,
    ttl: Duration,
}

impl FlashQueue {
    pub fn new() -> Self {
        Self::with_ttl(FLASH_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, category: FlashCategory) {
        self.entries
            .push_back((FlashMessage::new(text, category), Instant::now()));
    }

    pub fn dismiss_oldest(&mut self) {
        self.entries.pop_front();
    }

    /// Drop entries older than the TTL
    pub fn expire(&mut self) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.entries
            .retain(|(_, shown_at)| now.duration_since(*shown_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &FlashMessage> {
        self.entries.iter().map(|(msg, _)| msg)
    }
}

impl Default for FlashQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Global application state
pub struct AppState {
    /// Address of the panel gateway, shown in the header
    pub panel_addr: String,

    /// Whether app should quit
    pub should_quit: bool,

    /// Is help overlay visible?
    pub help_visible: bool,

    /// Open confirmation dialog (if any)
    pub confirm: Option<ConfirmDialog>,

    /// Pending flash notifications
    pub flash: FlashQueue,

    // Mirrors of the intake queue, refreshed before each render
    /// Is the live log paused?
    pub paused: bool,

    /// Messages held back while paused
    pub backlog_len: usize,

    /// Label for the pause control ("Pause" / "Unpause")
    pub pause_label: &'static str,
}

impl AppState {
    pub fn new(panel_addr: String) -> Self {
        Self {
            panel_addr,
            should_quit: false,
            help_visible: false,
            confirm: None,
            flash: FlashQueue::new(),
            paused: false,
            backlog_len: 0,
            pause_label: "Pause",
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn open_confirm(&mut self, dialog: ConfirmDialog) {
        self.confirm = Some(dialog);
    }

    /// Close the dialog, returning it so the caller can act on a confirm
    pub fn take_confirm(&mut self) -> Option<ConfirmDialog> {
        self.confirm.take()
    }
}
