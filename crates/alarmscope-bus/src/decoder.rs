use std::sync::Arc;

use tracing::{debug, warn};

use alarmscope_types::Keypress;

use crate::bus::InMemoryEventBus;
use crate::event::PanelEvent;

/// Handle through which the UI sends simulated keypad presses to the panel.
pub trait Decoder {
    /// Called once during wiring, before any keypress is emitted
    fn init(&self);

    /// Emit a keypress toward the panel
    fn emit(&self, key: Keypress);
}

/// Decoder that forwards keypresses over the event bus.
///
/// The panel connection subscribes to the keypress topic and writes the
/// encoded bytes to the device.
pub struct BusDecoder {
    bus: Arc<InMemoryEventBus>,
}

impl BusDecoder {
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }
}

impl Decoder for BusDecoder {
    fn init(&self) {
        debug!("decoder ready");
    }

    fn emit(&self, key: Keypress) {
        let receivers = self.bus.publish(PanelEvent::Keypress(key));
        if receivers == 0 {
            warn!(?key, "keypress dropped (no panel connection)");
        }
    }
}
