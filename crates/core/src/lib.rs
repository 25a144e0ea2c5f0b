// QueueDesk Core - Domain Logic, Ports & Dispatch Engine
// NO transport dependencies: RPC, daemon and clients live in sibling crates

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{DispatchEngine, DispatchStats, FinishedTicket, FloorLayout};
pub use error::{AppError, ErrorKind, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
