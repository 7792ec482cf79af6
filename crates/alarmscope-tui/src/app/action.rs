use alarmscope_types::{EmergencyKind, Keypress};

/// All possible actions in the application (command pattern)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,

    // Live log controls
    TogglePause,
    RequestClearLog,

    // Confirmation dialog
    Confirm,
    Cancel,

    // Table navigation
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    // Flash notifications
    DismissFlash,

    // Keypad forwarding
    Keypad(Keypress),
    RequestEmergency(EmergencyKind),

    // Render request
    Render,
}
