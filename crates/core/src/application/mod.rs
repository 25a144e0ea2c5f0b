// Application Layer - Use Cases and Business Logic

pub mod catalog;
pub mod counter_registry;
pub mod dispatch;
pub mod layout;
pub mod queue_store;
pub mod sequencer;

// Re-exports
pub use catalog::ServiceCatalog;
pub use counter_registry::CounterRegistry;
pub use dispatch::{DispatchEngine, DispatchStats, FinishedTicket, QueueLength};
pub use layout::{CounterSpec, FloorLayout};
pub use queue_store::QueueStore;
pub use sequencer::TicketSequencer;
