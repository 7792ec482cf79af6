mod event;
mod terminal;

pub use event::{Event, EventPump};
pub use terminal::Tui;
