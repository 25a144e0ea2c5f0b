//! QueueDesk SDK - Rust Client Library
//!
//! Provides a convenient client for the QueueDesk daemon.
//!
//! # Example
//!
//! ```no_run
//! use queuedesk_sdk::QueueDeskClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QueueDeskClient::connect("http://127.0.0.1:9630").await?;
//!
//!     // Kiosk: draw a ticket
//!     let ticket = client.create_ticket("express").await?;
//!     println!("Ticket {} (about {} min)", ticket.number, ticket.estimated_wait_minutes);
//!
//!     // Counter 1: call and serve it
//!     if let Some(called) = client.call_next(1).await? {
//!         client.complete(&called.number).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::QueueDeskClient;
pub use error::{code, Result, SdkError};
pub use types::{
    CallNextResponse, CancelResponse, Counter, CounterStatus, QueueLength, ReleaseResponse,
    ServiceType, StatsResponse, Ticket, TicketStatus,
};
