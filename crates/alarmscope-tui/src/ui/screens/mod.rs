mod event_log;

pub use event_log::EventLogScreen;
