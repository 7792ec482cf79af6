use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use alarmscope_types::{EmergencyKind, Keypress};

use crate::config::KeyBinding;

/// What a terminal key turns into on the simulated keypad
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeypadInput {
    /// Forward straight to the decoder
    Key(Keypress),
    /// Needs an explicit confirmation before anything is sent
    Emergency(EmergencyKind),
}

/// Static lookup table translating terminal keys into keypad input.
///
/// F1-F4 are the confirmation-gated emergency keys. Digits, `*`, `#` and
/// the edit/navigation keys forward directly, using the character codes
/// the panel sees for those keys.
pub struct KeypadMap {
    keys: HashMap<KeyBinding, KeypadInput>,
}

impl KeypadMap {
    pub fn new() -> Self {
        let mut keys = HashMap::new();

        keys.insert(
            KeyBinding::new(KeyCode::F(1)),
            KeypadInput::Emergency(EmergencyKind::Fire),
        );
        keys.insert(
            KeyBinding::new(KeyCode::F(2)),
            KeypadInput::Emergency(EmergencyKind::Police),
        );
        keys.insert(
            KeyBinding::new(KeyCode::F(3)),
            KeypadInput::Emergency(EmergencyKind::Medical),
        );
        keys.insert(
            KeyBinding::new(KeyCode::F(4)),
            KeypadInput::Emergency(EmergencyKind::Custom),
        );

        for digit in '0'..='9' {
            keys.insert(
                KeyBinding::new(KeyCode::Char(digit)),
                KeypadInput::Key(Keypress::Char(digit)),
            );
        }

        // Shifted 8 and 3 arrive from the terminal as the characters
        // themselves.
        keys.insert(
            KeyBinding::new(KeyCode::Char('*')),
            KeypadInput::Key(Keypress::Char('*')),
        );
        keys.insert(
            KeyBinding::new(KeyCode::Char('#')),
            KeypadInput::Key(Keypress::Char('#')),
        );

        keys.insert(
            KeyBinding::new(KeyCode::Backspace),
            KeypadInput::Key(Keypress::Char('\u{0008}')),
        );
        keys.insert(
            KeyBinding::new(KeyCode::Tab),
            KeypadInput::Key(Keypress::Char('\t')),
        );
        keys.insert(
            KeyBinding::new(KeyCode::Delete),
            KeypadInput::Key(Keypress::Char('.')),
        );
        keys.insert(
            KeyBinding::new(KeyCode::Left),
            KeypadInput::Key(Keypress::Char('%')),
        );
        keys.insert(
            KeyBinding::new(KeyCode::Right),
            KeypadInput::Key(Keypress::Char('\'')),
        );

        Self { keys }
    }

    /// Look up the keypad input for a terminal key event.
    ///
    /// Shifted characters (`*`, `#`) match their unshifted table entry.
    pub fn lookup(&self, key: &KeyEvent) -> Option<KeypadInput> {
        let binding = KeyBinding::from_event(key);
        if let Some(input) = self.keys.get(&binding) {
            return Some(*input);
        }

        if let KeyCode::Char(c) = key.code {
            if key.modifiers == KeyModifiers::SHIFT {
                return self.keys.get(&KeyBinding::new(KeyCode::Char(c))).copied();
            }
        }

        None
    }
}

impl Default for KeypadMap {
    fn default() -> Self {
        Self::new()
    }
}
