//! Terminal UI for alarmscope
//!
//! This crate provides the terminal user interface: application state,
//! keybindings and the keypad forwarding map, the crossterm event pump,
//! and the event log screen with its overlays.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, ConfirmDialog, FlashQueue, PendingAction};
pub use config::{KeyBinding, KeyBindings, KeyContext, KeypadInput, KeypadMap};
pub use tui::{Event, EventPump, Tui};
pub use ui::components::{ConfirmDialogView, FlashBar, HelpOverlay, StatusBar};
pub use ui::screens::EventLogScreen;
pub use ui::{Layout, Theme};
