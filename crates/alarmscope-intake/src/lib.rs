//! Live log intake queue for alarmscope
//!
//! This crate owns the pause/backlog/flush behavior of the live event log:
//! messages arriving while the display is paused are held back in arrival
//! order and flushed ahead of the next live message once unpaused. The
//! display itself is reached through the [`EventSink`] trait; the default
//! sink is the paginated [`EventTable`].

mod queue;
mod runner;
mod sink;
mod table;

pub use queue::IntakeQueue;
pub use runner::IntakeRunner;
pub use sink::{EventSink, SinkError};
pub use table::EventTable;

// Re-export types used in our public API
pub use alarmscope_types::{BacklogEntry, LogRow, PanelMessage};
