use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

use crate::DEFAULT_CHANNEL_CAPACITY;
use crate::event::{EventFilter, PanelEvent};

/// Errors from bus operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The bus was dropped while a subscription was still listening
    #[error("event bus closed")]
    Closed,
}

/// In-process event bus backed by `tokio::sync::broadcast`.
///
/// Every subscription sees every event matching its filter; an event with no
/// subscribers at all is dropped, which is normal during startup and
/// teardown.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<PanelEvent>,

    /// Live subscription handles, for teardown logging
    active: Arc<AtomicUsize>,

    /// Total events published
    events_published: AtomicU64,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            active: Arc::new(AtomicUsize::new(0)),
            events_published: AtomicU64::new(0),
        }
    }

    /// Publish an event, returning the number of subscribers that saw it.
    pub fn publish(&self, event: PanelEvent) -> usize {
        let topic = event.topic();
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(?topic, receivers = receiver_count, "event published");
                receiver_count
            }
            Err(_) => {
                debug!(?topic, "event dropped (no receivers)");
                0
            }
        }
    }

    /// Subscribe to events matching a filter.
    ///
    /// The returned handle deregisters itself when dropped.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let subscribed = self.active.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(topics = ?filter.topics, subscribed, "subscription created");

        Subscription {
            receiver: self.sender.subscribe(),
            filter,
            active: self.active.clone(),
        }
    }

    /// Number of live subscription handles
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Total events published since the bus was created
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription handle for receiving events.
///
/// Dropping the handle is the unsubscribe path; the broadcast receiver and
/// the bus-side bookkeeping go with it.
pub struct Subscription {
    receiver: broadcast::Receiver<PanelEvent>,
    filter: EventFilter,
    active: Arc<AtomicUsize>,
}

impl Subscription {
    /// Receive the next event matching the filter.
    ///
    /// Returns `None` once the bus has been dropped. A lagged receiver skips
    /// the overwritten events and keeps going.
    pub async fn recv(&mut self) -> Option<PanelEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "subscriber lagged, events skipped");
                }
            }
        }
    }

    /// Receive without blocking.
    pub fn try_recv(&mut self) -> Result<Option<PanelEvent>, BusError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(BusError::Closed),
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
            }
        }
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let remaining = self.active.fetch_sub(1, Ordering::Relaxed).saturating_sub(1);
        debug!(remaining, "subscription dropped");
    }
}
