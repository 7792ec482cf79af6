use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    EventLog,
    ConfirmDialog,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        bindings.insert(KeyContext::Global, global);

        // Event log bindings. Digits, arrows and the edit keys are absent
        // on purpose: they fall through to the keypad map.
        let mut event_log = HashMap::new();
        event_log.insert(KeyBinding::new(KeyCode::Char('p')), Action::TogglePause);
        event_log.insert(KeyBinding::new(KeyCode::Char('c')), Action::RequestClearLog);
        event_log.insert(KeyBinding::new(KeyCode::Char('n')), Action::NextPage);
        event_log.insert(KeyBinding::new(KeyCode::PageDown), Action::NextPage);
        event_log.insert(KeyBinding::new(KeyCode::Char('b')), Action::PrevPage);
        event_log.insert(KeyBinding::new(KeyCode::PageUp), Action::PrevPage);
        event_log.insert(KeyBinding::new(KeyCode::Char('g')), Action::FirstPage);
        event_log.insert(KeyBinding::new(KeyCode::Home), Action::FirstPage);
        event_log.insert(KeyBinding::shift(KeyCode::Char('G')), Action::LastPage);
        event_log.insert(KeyBinding::new(KeyCode::End), Action::LastPage);
        event_log.insert(KeyBinding::new(KeyCode::Char('x')), Action::DismissFlash);
        bindings.insert(KeyContext::EventLog, event_log);

        // Confirmation dialog bindings
        let mut confirm = HashMap::new();
        confirm.insert(KeyBinding::new(KeyCode::Char('y')), Action::Confirm);
        confirm.insert(KeyBinding::new(KeyCode::Enter), Action::Confirm);
        confirm.insert(KeyBinding::new(KeyCode::Char('n')), Action::Cancel);
        confirm.insert(KeyBinding::new(KeyCode::Esc), Action::Cancel);
        bindings.insert(KeyContext::ConfirmDialog, confirm);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(context_bindings) = self.bindings.get(&context) {
            if let Some(action) = context_bindings.get(&binding) {
                return Some(action.clone());
            }
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_event_log_bindings() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::EventLog, &key(KeyCode::Char('p'))),
            Some(Action::TogglePause)
        );
        assert_eq!(
            bindings.get_action(KeyContext::EventLog, &key(KeyCode::Char('c'))),
            Some(Action::RequestClearLog)
        );
        // Digits fall through to the keypad map.
        assert_eq!(
            bindings.get_action(KeyContext::EventLog, &key(KeyCode::Char('5'))),
            None
        );
    }

    #[test]
    fn test_global_fallback() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::EventLog, &key(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            bindings.get_action(
                KeyContext::ConfirmDialog,
                &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_confirm_dialog_bindings() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::ConfirmDialog, &key(KeyCode::Char('y'))),
            Some(Action::Confirm)
        );
        assert_eq!(
            bindings.get_action(KeyContext::ConfirmDialog, &key(KeyCode::Esc)),
            Some(Action::Cancel)
        );
        // 'n' cancels inside a dialog instead of paging.
        assert_eq!(
            bindings.get_action(KeyContext::ConfirmDialog, &key(KeyCode::Char('n'))),
            Some(Action::Cancel)
        );
    }
}
