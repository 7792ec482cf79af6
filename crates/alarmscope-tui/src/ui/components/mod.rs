mod confirm_dialog;
mod flash;
mod help_overlay;
mod status_bar;

pub use confirm_dialog::ConfirmDialogView;
pub use flash::FlashBar;
pub use help_overlay::HelpOverlay;
pub use status_bar::StatusBar;
