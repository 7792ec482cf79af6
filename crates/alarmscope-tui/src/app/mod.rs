mod action;
mod state;

pub use action::Action;
pub use state::{AppState, ConfirmDialog, FlashQueue, PendingAction};
