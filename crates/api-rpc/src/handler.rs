//! RPC Method Handlers
//!
//! Adapts each JSON-RPC method onto the dispatch engine.

use crate::error::{not_found, to_rpc_error, validation};
use crate::events::BroadcastEventSink;
use crate::types::{
    CallNextRequest, CallNextResponse, CancelResponse, CreateTicketRequest, ReleaseResponse,
    SetCounterStatusRequest, StatsResponse, TicketRequest,
};
use jsonrpsee::types::ErrorObjectOwned;
use queuedesk_core::domain::{Counter, CounterStatus, ServiceTypeDef, Ticket};
use queuedesk_core::DispatchEngine;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

type RpcResult<T> = Result<T, ErrorObjectOwned>;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    engine: Arc<DispatchEngine>,
    events: Arc<BroadcastEventSink>,
    start_time: Instant,
}

impl RpcHandler {
    pub fn new(engine: Arc<DispatchEngine>, events: Arc<BroadcastEventSink>) -> Self {
        Self {
            engine,
            events,
            start_time: Instant::now(),
        }
    }

    pub fn events(&self) -> &BroadcastEventSink {
        &self.events
    }

    /// ticket.create.v1
    pub async fn create_ticket(&self, params: CreateTicketRequest) -> RpcResult<Ticket> {
        self.engine
            .create_ticket(&params.service_type)
            .map_err(|e| rejected("ticket.create.v1", e))
    }

    /// ticket.begin.v1
    pub async fn begin_service(&self, params: TicketRequest) -> RpcResult<Ticket> {
        self.engine
            .begin_service(&params.ticket_number)
            .map_err(|e| rejected("ticket.begin.v1", e))
    }

    /// ticket.complete.v1
    pub async fn complete(&self, params: TicketRequest) -> RpcResult<ReleaseResponse> {
        let finished = self
            .engine
            .complete_service(&params.ticket_number)
            .map_err(|e| rejected("ticket.complete.v1", e))?;
        Ok(ReleaseResponse {
            ticket_number: finished.ticket.number,
            counter: finished.counter,
        })
    }

    /// ticket.no_show.v1
    pub async fn no_show(&self, params: TicketRequest) -> RpcResult<ReleaseResponse> {
        let finished = self
            .engine
            .mark_no_show(&params.ticket_number)
            .map_err(|e| rejected("ticket.no_show.v1", e))?;
        Ok(ReleaseResponse {
            ticket_number: finished.ticket.number,
            counter: finished.counter,
        })
    }

    /// ticket.cancel.v1
    pub async fn cancel(&self, params: TicketRequest) -> RpcResult<CancelResponse> {
        let ticket = self
            .engine
            .cancel_ticket(&params.ticket_number)
            .map_err(|e| rejected("ticket.cancel.v1", e))?;
        Ok(CancelResponse {
            ticket_number: ticket.number,
            cancelled: true,
        })
    }

    /// ticket.get.v1
    pub async fn get_ticket(&self, params: TicketRequest) -> RpcResult<Ticket> {
        self.engine
            .ticket(&params.ticket_number)
            .map_err(to_rpc_error)?
            .ok_or_else(|| {
                not_found(format!(
                    "Ticket {} is not waiting or at a counter",
                    params.ticket_number
                ))
            })
    }

    /// ticket.waiting.v1
    pub async fn waiting(&self) -> RpcResult<Vec<Ticket>> {
        self.engine.list_waiting_tickets().map_err(to_rpc_error)
    }

    /// counter.call_next.v1
    pub async fn call_next(&self, params: CallNextRequest) -> RpcResult<CallNextResponse> {
        let ticket = self
            .engine
            .call_next(params.counter)
            .map_err(|e| rejected("counter.call_next.v1", e))?;
        Ok(CallNextResponse {
            counter: params.counter,
            ticket,
        })
    }

    /// counter.set_status.v1
    pub async fn set_counter_status(&self, params: SetCounterStatusRequest) -> RpcResult<Counter> {
        let status: CounterStatus = params.status.parse().map_err(validation)?;
        self.engine
            .set_counter_status(params.counter, status)
            .map_err(|e| rejected("counter.set_status.v1", e))
    }

    /// counter.list.v1
    pub async fn counters(&self) -> RpcResult<Vec<Counter>> {
        self.engine.list_counters().map_err(to_rpc_error)
    }

    /// service.list.v1
    pub async fn service_types(&self) -> RpcResult<Vec<ServiceTypeDef>> {
        Ok(self.engine.list_service_types())
    }

    /// admin.stats.v1
    pub async fn stats(&self) -> RpcResult<StatsResponse> {
        let stats = self.engine.stats().map_err(to_rpc_error)?;
        Ok(StatsResponse {
            queues: stats.queues,
            total_waiting: stats.total_waiting,
            at_counters: stats.at_counters,
            counters_available: stats.counters_available,
            counters_serving: stats.counters_serving,
            counters_closed: stats.counters_closed,
            counters_on_break: stats.counters_on_break,
            subscribers: self.events.subscriber_count(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        })
    }
}

fn rejected(method: &str, err: queuedesk_core::AppError) -> ErrorObjectOwned {
    warn!(method, error = %err, "Request rejected");
    to_rpc_error(err)
}
