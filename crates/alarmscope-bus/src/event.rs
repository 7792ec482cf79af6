use alarmscope_types::{Keypress, PanelMessage};

/// Topics events are published under
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTopic {
    /// Live panel messages for the event log
    Message,
    /// Simulated keypad presses bound for the panel
    Keypress,
}

/// An event carried by the bus
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    Message(PanelMessage),
    Keypress(Keypress),
}

impl PanelEvent {
    /// The topic this event is published under
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Message(_) => EventTopic::Message,
            Self::Keypress(_) => EventTopic::Keypress,
        }
    }
}

/// Selects which topics a subscription receives
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// Topics to deliver; empty means all
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Match every topic
    pub fn all() -> Self {
        Self { topics: Vec::new() }
    }

    /// Match a single topic
    pub fn topic(topic: EventTopic) -> Self {
        Self {
            topics: vec![topic],
        }
    }

    pub fn matches(&self, event: &PanelEvent) -> bool {
        self.topics.is_empty() || self.topics.contains(&event.topic())
    }
}
