use thiserror::Error;

use alarmscope_types::LogRow;

/// Errors from the display sink
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The rendering target is gone or refused the row
    #[error("display sink unavailable: {0}")]
    Unavailable(String),
}

/// Ordered-row display target for the live event log.
///
/// `redraw` must be called after each insert so the visible state is
/// consistent after every single message; implementations preserve the
/// currently viewed page across redraws rather than resetting to the first
/// page.
pub trait EventSink {
    /// Append a row after the existing rows
    fn insert_row(&self, row: LogRow) -> Result<(), SinkError>;

    /// Refresh derived display state after an insert
    fn redraw(&self) -> Result<(), SinkError>;

    /// Remove every rendered row
    fn clear_all(&self) -> Result<(), SinkError>;
}
