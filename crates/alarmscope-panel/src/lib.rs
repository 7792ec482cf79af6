//! Panel gateway connection for alarmscope
//!
//! This crate maintains the TCP connection to the alarm panel gateway:
//! inbound lines become bus messages, keypress events from the bus are
//! encoded and written back to the device.

mod connection;

pub use connection::{PanelConnection, PanelError, encode_keypress};

// Re-export types used in our public API
pub use alarmscope_types::{Keypress, PanelMessage};
