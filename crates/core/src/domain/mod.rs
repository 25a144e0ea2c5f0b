// Domain Layer - Pure business entities and state transitions

pub mod counter;
pub mod error;
pub mod event;
pub mod service_type;
pub mod ticket;

// Re-exports
pub use counter::{Counter, CounterNumber, CounterStatus};
pub use error::DomainError;
pub use event::QueueEvent;
pub use service_type::{Priority, ServiceTypeDef, ServiceTypeId};
pub use ticket::{Ticket, TicketNumber, TicketStatus};
