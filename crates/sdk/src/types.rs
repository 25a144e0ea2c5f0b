//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types of the daemon.

use serde::{Deserialize, Serialize};

/// Ticket lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Waiting,
    Called,
    Serving,
    Completed,
    NoShow,
    Cancelled,
}

/// Counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterStatus {
    Available,
    Serving,
    Closed,
    Break,
}

impl CounterStatus {
    fn as_str(&self) -> &'static str {
        match self {
            CounterStatus::Available => "AVAILABLE",
            CounterStatus::Serving => "SERVING",
            CounterStatus::Closed => "CLOSED",
            CounterStatus::Break => "BREAK",
        }
    }
}

impl std::fmt::Display for CounterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ticket {
    pub number: String,
    pub service_type: String,
    pub priority: i32,
    /// Epoch milliseconds
    pub created_at: i64,
    pub status: TicketStatus,
    pub counter: Option<u32>,
    pub estimated_wait_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Counter {
    pub number: u32,
    pub name: String,
    pub status: CounterStatus,
    pub service_types: Vec<String>,
    pub current_ticket: Option<String>,
    pub current_operator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub average_processing_time_minutes: u32,
    pub default_priority: i32,
    pub ticket_prefix: String,
    pub is_active: bool,
}

/// Response from complete / no-show: the counter is free again
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseResponse {
    pub ticket_number: String,
    pub counter: Counter,
}

/// Response from cancel
#[derive(Debug, Clone, Deserialize)]
pub struct CancelResponse {
    pub ticket_number: String,
    pub cancelled: bool,
}

/// Response from call-next
#[derive(Debug, Clone, Deserialize)]
pub struct CallNextResponse {
    pub counter: u32,
    /// `None` when no eligible ticket is waiting
    pub ticket: Option<Ticket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueLength {
    pub service_type: String,
    pub waiting: usize,
}

/// Response from admin stats
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub queues: Vec<QueueLength>,
    pub total_waiting: usize,
    pub at_counters: usize,
    pub counters_available: usize,
    pub counters_serving: usize,
    pub counters_closed: usize,
    pub counters_on_break: usize,
    pub subscribers: usize,
    pub uptime_seconds: u64,
}
