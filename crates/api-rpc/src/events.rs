//! Broadcast Event Sink
//!
//! Fans engine events out to WebSocket subscribers through a tokio broadcast
//! channel. Publishing never blocks: with no receivers the event is dropped,
//! and slow receivers lag instead of holding up the engine.

use queuedesk_core::domain::QueueEvent;
use queuedesk_core::port::EventSink;
use tokio::sync::broadcast;
use tracing::{debug, trace};

pub const DEFAULT_EVENT_BUFFER: usize = 256;

pub struct BroadcastEventSink {
    sender: broadcast::Sender<QueueEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER)
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: QueueEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, "Queue event broadcast"),
            Err(_) => trace!("Queue event dropped (no subscribers)"),
        }
    }
}
