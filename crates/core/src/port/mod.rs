// Port Layer - Interfaces for external collaborators

pub mod event_sink;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use event_sink::EventSink;
pub use time_provider::{SystemTimeProvider, TimeProvider};
