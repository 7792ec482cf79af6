use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use alarmscope_bus::{PanelEvent, Subscription};

use crate::queue::IntakeQueue;
use crate::sink::EventSink;

/// Drives an [`IntakeQueue`] from a bus subscription.
///
/// Subscribed once for the process lifetime; delivery errors are logged and
/// the loop keeps going, so a flaky sink never stalls intake.
pub struct IntakeRunner {
    cancel: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl IntakeRunner {
    pub fn start<S>(queue: Arc<Mutex<IntakeQueue<S>>>, mut subscription: Subscription) -> Self
    where
        S: EventSink + Send + 'static,
    {
        let cancel = CancellationToken::new();

        let task = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,

                        event = subscription.recv() => match event {
                            Some(PanelEvent::Message(message)) => {
                                if let Err(e) = queue.lock().deliver(&message) {
                                    warn!(error = %e, raw = %message.raw, "message delivery failed, held in backlog");
                                }
                            }
                            Some(_) => {}
                            None => break,
                        },
                    }
                }
            }
        });

        Self {
            cancel,
            task: Some(task),
        }
    }

    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for IntakeRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::EventTable;
    use alarmscope_bus::{EventFilter, EventTopic, InMemoryEventBus};
    use alarmscope_types::PanelMessage;
    use std::time::Duration;

    #[tokio::test]
    async fn test_runner_delivers_bus_messages() {
        let bus = InMemoryEventBus::new();
        let table = EventTable::new(100, 10);
        let queue = Arc::new(Mutex::new(IntakeQueue::new(table.clone())));

        let mut runner = IntakeRunner::start(
            queue.clone(),
            bus.subscribe(EventFilter::topic(EventTopic::Message)),
        );

        bus.publish(PanelEvent::Message(PanelMessage::new(
            "2024-01-01 10:00:00.123456",
            "ARM STAY",
        )));

        // The runner task picks the event up on its next poll.
        for _ in 0..50 {
            if table.len() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(table.len(), 1);
        assert_eq!(table.page_rows()[0].message, "ARM STAY");
        assert_eq!(table.page_rows()[0].timestamp, "2024-01-01 10:00:00");

        runner.stop();
    }

    #[tokio::test]
    async fn test_runner_respects_pause() {
        let bus = InMemoryEventBus::new();
        let table = EventTable::new(100, 10);
        let queue = Arc::new(Mutex::new(IntakeQueue::new(table.clone())));
        queue.lock().toggle_pause();

        let mut runner = IntakeRunner::start(
            queue.clone(),
            bus.subscribe(EventFilter::topic(EventTopic::Message)),
        );

        bus.publish(PanelEvent::Message(PanelMessage::new(
            "2024-01-01 10:00:00.123456",
            "FAULT 07",
        )));

        for _ in 0..50 {
            if queue.lock().backlog_len() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(table.is_empty());
        assert_eq!(queue.lock().backlog_len(), 1);

        runner.stop();
    }
}
