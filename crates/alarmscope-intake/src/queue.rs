use std::collections::VecDeque;

use chrono::Local;
use tracing::warn;

use alarmscope_types::{BacklogEntry, PanelMessage, format_display_timestamp, trim_fractional};

use crate::sink::{EventSink, SinkError};

/// The live log intake queue.
///
/// Receives each panel message exactly once and either renders it
/// immediately or holds it in the backlog, depending on the pause flag.
/// The backlog is owned here and flushed in arrival order ahead of the
/// first live message delivered after unpausing. Messages are never
/// dropped: a failing sink leaves the unrendered rows in the backlog.
pub struct IntakeQueue<S> {
    sink: S,
    backlog: VecDeque<BacklogEntry>,
    paused: bool,
}

impl<S: EventSink> IntakeQueue<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            backlog: VecDeque::new(),
            paused: false,
        }
    }

    /// Process one received message.
    ///
    /// While paused the message is appended to the backlog and nothing is
    /// rendered. While running, any backlog is rendered first (insert then
    /// redraw, entry by entry), then the message itself. A message whose
    /// timestamp is empty is displayed under the current wall-clock
    /// timestamp instead.
    pub fn deliver(&mut self, message: &PanelMessage) -> Result<(), SinkError> {
        let display_timestamp = format_display_timestamp(&Local::now());
        let row_timestamp = match trim_fractional(&message.timestamp) {
            "" => display_timestamp,
            trimmed => trimmed.to_string(),
        };
        let entry = BacklogEntry::new(row_timestamp, message.raw.clone());

        if self.paused {
            self.backlog.push_back(entry);
            return Ok(());
        }

        // Drain the backlog ahead of the live message so rows reach the
        // sink in arrival order.
        let mut pending = std::mem::take(&mut self.backlog);
        pending.push_back(entry);

        while let Some(entry) = pending.pop_front() {
            if let Err(e) = self.sink.insert_row(entry.clone().into_row()) {
                // The sink refused the row: keep it, and everything behind
                // it, for the next delivery.
                pending.push_front(entry);
                self.backlog = pending;
                return Err(e);
            }
            if let Err(e) = self.sink.redraw() {
                warn!(error = %e, "redraw failed after insert");
            }
        }

        Ok(())
    }

    /// Flip the pause flag, returning the new state.
    ///
    /// The backlog is untouched; a pending backlog is flushed by the next
    /// delivery while unpaused, not at toggle time.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// User-facing label for the pause control
    pub fn pause_label(&self) -> &'static str {
        if self.paused { "Unpause" } else { "Pause" }
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Empty the sink's rendered rows.
    ///
    /// Backlog contents and the pause flag are unaffected.
    pub fn clear(&self) -> Result<(), SinkError> {
        self.sink.clear_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmscope_types::LogRow;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum SinkCall {
        Insert(LogRow),
        Redraw,
        Clear,
    }

    /// Sink that records every call and can be told to refuse inserts
    #[derive(Clone, Default)]
    struct RecordingSink {
        calls: Arc<Mutex<Vec<SinkCall>>>,
        fail_inserts: Arc<AtomicBool>,
    }

    impl RecordingSink {
        fn calls(&self) -> Vec<SinkCall> {
            self.calls.lock().clone()
        }

        fn inserted_rows(&self) -> Vec<LogRow> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    SinkCall::Insert(row) => Some(row),
                    _ => None,
                })
                .collect()
        }

        fn set_failing(&self, failing: bool) {
            self.fail_inserts.store(failing, Ordering::SeqCst);
        }
    }

    impl EventSink for RecordingSink {
        fn insert_row(&self, row: LogRow) -> Result<(), SinkError> {
            if self.fail_inserts.load(Ordering::SeqCst) {
                return Err(SinkError::Unavailable("test".into()));
            }
            self.calls.lock().push(SinkCall::Insert(row));
            Ok(())
        }

        fn redraw(&self) -> Result<(), SinkError> {
            self.calls.lock().push(SinkCall::Redraw);
            Ok(())
        }

        fn clear_all(&self) -> Result<(), SinkError> {
            self.calls.lock().push(SinkCall::Clear);
            Ok(())
        }
    }

    fn msg(n: usize) -> PanelMessage {
        PanelMessage::new(format!("2024-01-01 10:00:0{n}.123456"), format!("MSG {n}"))
    }

    #[test]
    fn test_unpaused_messages_render_in_order() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        for n in 0..3 {
            queue.deliver(&msg(n)).unwrap();
        }

        // Exactly one insert per message, each followed by a redraw.
        let calls = sink.calls();
        assert_eq!(calls.len(), 6);
        for pair in calls.chunks(2) {
            assert!(matches!(pair[0], SinkCall::Insert(_)));
            assert_eq!(pair[1], SinkCall::Redraw);
        }

        let rows = sink.inserted_rows();
        assert_eq!(rows.len(), 3);
        for (n, row) in rows.iter().enumerate() {
            assert_eq!(row.message, format!("MSG {n}"));
            assert_eq!(row.timestamp, format!("2024-01-01 10:00:0{n}"));
        }
        assert_eq!(queue.backlog_len(), 0);
    }

    #[test]
    fn test_paused_messages_accumulate_without_rendering() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        assert!(queue.toggle_pause());
        for n in 0..3 {
            queue.deliver(&msg(n)).unwrap();
            assert_eq!(queue.backlog_len(), n + 1);
        }

        assert!(sink.calls().is_empty());
    }

    #[test]
    fn test_paused_entry_uses_trimmed_timestamp() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        queue.toggle_pause();
        queue
            .deliver(&PanelMessage::new("2024-01-01T10:00:00.123", "ARM AWAY"))
            .unwrap();

        assert_eq!(queue.backlog_len(), 1);
        assert!(sink.calls().is_empty());

        // Flush on the next unpaused delivery exposes the stored entry.
        queue.toggle_pause();
        queue
            .deliver(&PanelMessage::new("2024-01-01T10:00:05.456", "DISARM"))
            .unwrap();

        let rows = sink.inserted_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], LogRow::new("2024-01-01T10:00:00", "ARM AWAY"));
        assert_eq!(rows[1], LogRow::new("2024-01-01T10:00:05", "DISARM"));
        assert_eq!(queue.backlog_len(), 0);
    }

    #[test]
    fn test_backlog_flushes_before_live_message() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        queue.toggle_pause();
        for n in 0..3 {
            queue.deliver(&msg(n)).unwrap();
        }
        queue.toggle_pause();

        // Unpausing alone renders nothing.
        assert!(sink.calls().is_empty());
        assert_eq!(queue.backlog_len(), 3);

        queue.deliver(&msg(4)).unwrap();

        let rows = sink.inserted_rows();
        let messages: Vec<&str> = rows.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["MSG 0", "MSG 1", "MSG 2", "MSG 4"]);
        assert_eq!(queue.backlog_len(), 0);

        // Every insert had its own redraw.
        let redraws = sink
            .calls()
            .iter()
            .filter(|c| **c == SinkCall::Redraw)
            .count();
        assert_eq!(redraws, 4);
    }

    #[test]
    fn test_toggling_mid_stream_never_drops_a_message() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        let mut delivered = 0;
        for round in 0..4 {
            queue.toggle_pause();
            for n in 0..round + 1 {
                queue.deliver(&msg(n)).unwrap();
                delivered += 1;
            }
        }

        assert_eq!(sink.inserted_rows().len() + queue.backlog_len(), delivered);
    }

    #[test]
    fn test_empty_timestamp_falls_back_to_wall_clock() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        queue.deliver(&PanelMessage::new("", "CHIME")).unwrap();

        let rows = sink.inserted_rows();
        assert_eq!(rows.len(), 1);
        // DD/MM/YYYY HH:MM:SS
        assert_eq!(rows[0].timestamp.len(), 19);
        assert_eq!(&rows[0].timestamp[2..3], "/");
        assert_eq!(&rows[0].timestamp[5..6], "/");
    }

    #[test]
    fn test_failing_sink_keeps_messages_in_backlog() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        sink.set_failing(true);
        assert!(queue.deliver(&msg(0)).is_err());
        assert_eq!(queue.backlog_len(), 1);

        // Recovery renders the retained row ahead of the new one.
        sink.set_failing(false);
        queue.deliver(&msg(1)).unwrap();

        let rows = sink.inserted_rows();
        let messages: Vec<&str> = rows.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["MSG 0", "MSG 1"]);
        assert_eq!(queue.backlog_len(), 0);
    }

    #[test]
    fn test_pause_label_reflects_state() {
        let mut queue = IntakeQueue::new(RecordingSink::default());
        assert_eq!(queue.pause_label(), "Pause");
        queue.toggle_pause();
        assert_eq!(queue.pause_label(), "Unpause");
        queue.toggle_pause();
        assert_eq!(queue.pause_label(), "Pause");
    }

    #[test]
    fn test_clear_leaves_backlog_and_pause_alone() {
        let sink = RecordingSink::default();
        let mut queue = IntakeQueue::new(sink.clone());

        queue.toggle_pause();
        queue.deliver(&msg(0)).unwrap();

        queue.clear().unwrap();

        assert_eq!(sink.calls(), vec![SinkCall::Clear]);
        assert!(queue.is_paused());
        assert_eq!(queue.backlog_len(), 1);
    }
}
