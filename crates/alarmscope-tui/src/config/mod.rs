mod keybindings;
mod keypad;

pub use keybindings::{KeyBinding, KeyBindings, KeyContext};
pub use keypad::{KeypadInput, KeypadMap};
