// Event Sink Port - outbound, fire-and-forget notifications

use crate::domain::QueueEvent;

/// Receives domain events for fan-out to observers.
///
/// The engine publishes while still inside its consistency boundary, so
/// implementations must return immediately: buffer, drop or log, never block.
/// Delivery failures are the sink's business and never reach the engine.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: QueueEvent);
}

/// Sink that discards every event (for embedding without observers)
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, event: QueueEvent) {
        tracing::trace!(?event, "Event discarded (no sink attached)");
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Records every published event in order
    #[derive(Default)]
    pub struct RecordingEventSink {
        events: Mutex<Vec<QueueEvent>>,
    }

    impl RecordingEventSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<QueueEvent> {
            self.events.lock().unwrap().clone()
        }

        /// Drain recorded events
        pub fn take(&self) -> Vec<QueueEvent> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }
    }

    impl EventSink for RecordingEventSink {
        fn publish(&self, event: QueueEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
