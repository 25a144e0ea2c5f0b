//! JSON-RPC API Layer
//!
//! JSON-RPC 2.0 server for QueueDesk: request/response methods over HTTP and
//! live queue events over WebSocket subscriptions, on one port.

pub mod error;
pub mod events;
pub mod handler;
pub mod server;
pub mod types;

pub use events::BroadcastEventSink;
pub use server::{RpcServer, RpcServerConfig};
