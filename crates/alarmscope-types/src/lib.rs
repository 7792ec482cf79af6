//! Shared types for alarmscope
//!
//! This crate contains data structures used across multiple alarmscope crates.

use chrono::{DateTime, Local};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

// ============================================================================
// Panel Messages
// ============================================================================

/// A single message received from the alarm panel.
///
/// The timestamp is the stamp applied when the line was read from the panel
/// feed and may carry sub-second precision (`YYYY-MM-DD HH:MM:SS.ffffff`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMessage {
    /// Stamp applied at receipt, sub-second precision allowed
    pub timestamp: String,

    /// Raw panel payload, displayed verbatim
    pub raw: String,
}

impl PanelMessage {
    pub fn new(timestamp: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            raw: raw.into(),
        }
    }

    /// The message timestamp with fractional seconds dropped
    pub fn trimmed_timestamp(&self) -> &str {
        trim_fractional(&self.timestamp)
    }
}

/// A display-ready pair handed to the event sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRow {
    pub timestamp: String,
    pub message: String,
}

impl LogRow {
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }
}

/// A message held back while the live log is paused.
///
/// Arrival order is preserved by the owning queue; entries convert into
/// [`LogRow`]s when the backlog is flushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacklogEntry {
    pub timestamp: String,
    pub message: String,
}

impl BacklogEntry {
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }

    pub fn into_row(self) -> LogRow {
        LogRow {
            timestamp: self.timestamp,
            message: self.message,
        }
    }
}

// ============================================================================
// Keypad
// ============================================================================

/// A simulated keypad press forwarded to the panel decoder.
///
/// Serializes to the decoder wire shape: a one-character string for ordinary
/// keys, a bare integer for the function keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keypress {
    /// Ordinary keypad character (digits, `*`, `#`, edit keys)
    Char(char),
    /// Function key code 1-4
    Special(u8),
}

/// The four confirmation-gated emergency keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmergencyKind {
    Fire,
    Police,
    Medical,
    Custom,
}

impl EmergencyKind {
    /// Decoder function-key code for this emergency
    pub fn code(&self) -> u8 {
        match self {
            Self::Fire => 1,
            Self::Police => 2,
            Self::Medical => 3,
            Self::Custom => 4,
        }
    }

    pub fn keypress(&self) -> Keypress {
        Keypress::Special(self.code())
    }

    /// Title shown on the confirmation dialog
    pub fn dialog_title(&self) -> &'static str {
        match self {
            Self::Fire => "Call the Fire Department",
            Self::Police => "Call the Police Department",
            Self::Medical => "Call the Medics",
            Self::Custom => "Confirmation required",
        }
    }

    /// Flash text announced once the keypress has been sent
    pub fn flash_text(&self) -> &'static str {
        match self {
            Self::Fire => "Fire Department notified.",
            Self::Police => "Police Department notified.",
            Self::Medical => "Medical Help notified.",
            Self::Custom => "Notification sent.",
        }
    }
}

// ============================================================================
// Flash Notifications
// ============================================================================

/// Category of a transient flash notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashCategory {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashCategory {
    /// Display color for this category
    pub fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Info => Color::Cyan,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// A transient notification shown above the event log
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashMessage {
    pub text: String,
    pub category: FlashCategory,
}

impl FlashMessage {
    pub fn new(text: impl Into<String>, category: FlashCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Wall-clock display format: zero-padded `DD/MM/YYYY HH:MM:SS`
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Stamp format applied to messages as they are read from the panel feed
pub const MESSAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format a wall-clock instant for display in the event log
pub fn format_display_timestamp(now: &DateTime<Local>) -> String {
    now.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

/// Drop fractional seconds by truncating at the first `.`.
///
/// A timestamp without a `.` is returned unchanged.
pub fn trim_fractional(timestamp: &str) -> &str {
    match timestamp.find('.') {
        Some(idx) => &timestamp[..idx],
        None => timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_trim_fractional() {
        assert_eq!(
            trim_fractional("2024-01-01T10:00:00.123"),
            "2024-01-01T10:00:00"
        );
        assert_eq!(trim_fractional("2024-01-01 10:00:00"), "2024-01-01 10:00:00");
        assert_eq!(trim_fractional(""), "");
    }

    #[test]
    fn test_trimmed_timestamp() {
        let msg = PanelMessage::new("2024-01-01 10:00:00.123456", "ARM AWAY");
        assert_eq!(msg.trimmed_timestamp(), "2024-01-01 10:00:00");
    }

    #[test]
    fn test_display_timestamp_zero_padded() {
        let dt = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 4).unwrap();
        assert_eq!(format_display_timestamp(&dt), "07/03/2024 09:05:04");
    }

    #[test]
    fn test_keypress_wire_shape() {
        // Ordinary keys travel as one-character strings, function keys as
        // bare integers.
        assert_eq!(
            serde_json::to_value(Keypress::Char('*')).unwrap(),
            serde_json::json!("*")
        );
        assert_eq!(
            serde_json::to_value(Keypress::Special(2)).unwrap(),
            serde_json::json!(2)
        );

        let key: Keypress = serde_json::from_value(serde_json::json!("5")).unwrap();
        assert_eq!(key, Keypress::Char('5'));
        let key: Keypress = serde_json::from_value(serde_json::json!(4)).unwrap();
        assert_eq!(key, Keypress::Special(4));
    }

    #[test]
    fn test_emergency_codes() {
        assert_eq!(EmergencyKind::Fire.code(), 1);
        assert_eq!(EmergencyKind::Police.code(), 2);
        assert_eq!(EmergencyKind::Medical.code(), 3);
        assert_eq!(EmergencyKind::Custom.code(), 4);
        assert_eq!(EmergencyKind::Fire.keypress(), Keypress::Special(1));
    }

    #[test]
    fn test_backlog_entry_into_row() {
        let entry = BacklogEntry::new("2024-01-01T10:00:00", "DISARM");
        let row = entry.into_row();
        assert_eq!(row.timestamp, "2024-01-01T10:00:00");
        assert_eq!(row.message, "DISARM");
    }
}
