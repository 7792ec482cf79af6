//! In-process publish/subscribe event bus for alarmscope
//!
//! Panel messages and simulated keypad presses travel between components as
//! topic-tagged events. Subscribers hold an explicit handle that deregisters
//! itself when dropped.

mod bus;
mod decoder;
mod event;

pub use bus::{BusError, InMemoryEventBus, Subscription};
pub use decoder::{BusDecoder, Decoder};
pub use event::{EventFilter, EventTopic, PanelEvent};

// Re-export types used in our public API
pub use alarmscope_types::{Keypress, PanelMessage};

/// Default broadcast channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
