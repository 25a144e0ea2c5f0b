//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results. Entities (`Ticket`,
//! `Counter`, `ServiceTypeDef`) are returned as their core serde form.

use queuedesk_core::domain::{Counter, CounterNumber, ServiceTypeId, Ticket, TicketNumber};
use queuedesk_core::application::QueueLength;
use serde::{Deserialize, Serialize};

/// ticket.create.v1 - Draw a ticket
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub service_type: ServiceTypeId,
}

/// ticket.begin.v1 / complete.v1 / no_show.v1 / cancel.v1 / get.v1
#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    pub ticket_number: TicketNumber,
}

/// ticket.complete.v1 / ticket.no_show.v1 - The ticket left its counter
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseResponse {
    pub ticket_number: TicketNumber,
    pub counter: Counter,
}

/// ticket.cancel.v1
#[derive(Debug, Clone, Serialize)]
pub struct CancelResponse {
    pub ticket_number: TicketNumber,
    pub cancelled: bool,
}

/// counter.call_next.v1
#[derive(Debug, Deserialize)]
pub struct CallNextRequest {
    pub counter: CounterNumber,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallNextResponse {
    pub counter: CounterNumber,
    /// `null` when no eligible ticket is waiting
    pub ticket: Option<Ticket>,
}

/// counter.set_status.v1
#[derive(Debug, Deserialize)]
pub struct SetCounterStatusRequest {
    pub counter: CounterNumber,
    /// AVAILABLE, CLOSED or BREAK (case-insensitive)
    pub status: String,
}

/// admin.stats.v1 - Get system statistics
#[derive(Debug, Clone, Serialize)]
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

/// queue.subscribe.v1 - Optional interest filter
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubscribeRequest {
    /// Empty means every event
    pub service_types: Vec<ServiceTypeId>,
}
