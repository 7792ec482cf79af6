use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Input events driving the main loop
#[derive(Clone, Debug)]
pub enum Event {
    /// Periodic tick; drives flash expiry and re-render
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// The terminal input stream failed
    Error(String),
}

/// Merges terminal input and a tick interval into one event stream.
pub struct EventPump {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
    _task: tokio::task::JoinHandle<()>,
}

impl EventPump {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(pump(sender, cancel.clone(), tick_rate));

        Self {
            receiver,
            cancel,
            _task: task,
        }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Stop the pump task; already queued events can still be drained
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

async fn pump(sender: mpsc::UnboundedSender<Event>, cancel: CancellationToken, tick_rate: Duration) {
    let mut input = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            _ = ticks.tick() => {
                if sender.send(Event::Tick).is_err() {
                    break;
                }
            }

            input_event = input.next().fuse() => {
                let event = match input_event {
                    Some(Ok(CrosstermEvent::Key(key))) => {
                        // Release events arrive on some platforms; only
                        // presses count.
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => Event::Error(e.to_string()),
                    None => break,
                };

                if sender.send(event).is_err() {
                    break;
                }
            }
        }
    }
}
