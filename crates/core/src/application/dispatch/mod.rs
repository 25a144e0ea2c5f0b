// Dispatch Engine - ticket admission, counter assignment and completion

pub mod call_next;
pub mod create_ticket;
pub mod finish;

#[cfg(test)]
mod dispatch_test;

pub use create_ticket::estimate_wait_minutes;

use super::catalog::ServiceCatalog;
use super::counter_registry::CounterRegistry;
use super::layout::FloorLayout;
use super::queue_store::QueueStore;
use super::sequencer::TicketSequencer;
use crate::domain::{
    Counter, CounterNumber, CounterStatus, QueueEvent, ServiceTypeDef, ServiceTypeId, Ticket,
    TicketNumber,
};
use crate::error::{AppError, Result};
use crate::port::{EventSink, TimeProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Everything the engine mutates, guarded as one unit
#[derive(Debug)]
pub struct DispatchState {
    pub queues: QueueStore,
    pub counters: CounterRegistry,
    pub sequencer: TicketSequencer,
    /// Tickets that are Called or Serving, keyed by number
    pub at_counters: HashMap<TicketNumber, Ticket>,
}

impl DispatchState {
    fn new(catalog: &ServiceCatalog, counters: CounterRegistry) -> Self {
        Self {
            queues: QueueStore::new(catalog.ids()),
            counters,
            sequencer: TicketSequencer::new(),
            at_counters: HashMap::new(),
        }
    }
}

/// Ticket that left a counter together with the counter it left
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedTicket {
    pub ticket: Ticket,
    pub counter: Counter,
}

/// Waiting count of one service type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueLength {
    pub service_type: ServiceTypeId,
    pub waiting: usize,
}

/// Point-in-time view of queues and counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub queues: Vec<QueueLength>,
    pub total_waiting: usize,
    pub at_counters: usize,
    pub counters_available: usize,
    pub counters_serving: usize,
    pub counters_closed: usize,
    pub counters_on_break: usize,
}

/// The orchestrator.
///
/// Every operation takes the single state lock, so create/call/complete are
/// linearizable: two counters calling at once can never dequeue the same
/// ticket, and no caller ever sees a ticket Called without its counter
/// Serving. Events are published after the state change, before the lock is
/// released, so the event stream follows the same total order.
pub struct DispatchEngine {
    catalog: Arc<ServiceCatalog>,
    state: Mutex<DispatchState>,
    event_sink: Arc<dyn EventSink>,
    time_provider: Arc<dyn TimeProvider>,
}

impl DispatchEngine {
    pub fn new(
        catalog: Arc<ServiceCatalog>,
        counters: CounterRegistry,
        event_sink: Arc<dyn EventSink>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        let state = DispatchState::new(&catalog, counters);
        Self {
            catalog,
            state: Mutex::new(state),
            event_sink,
            time_provider,
        }
    }

    /// Build an engine from static configuration
    pub fn from_layout(
        layout: &FloorLayout,
        event_sink: Arc<dyn EventSink>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let (catalog, counters) = layout.build()?;
        info!(
            service_types = catalog.list_all().len(),
            counters = counters.len(),
            "Dispatch engine configured"
        );
        Ok(Self::new(
            Arc::new(catalog),
            counters,
            event_sink,
            time_provider,
        ))
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Draw a ticket for `service_type`
    pub fn create_ticket(&self, service_type: &str) -> Result<Ticket> {
        self.transact(|state, events| {
            create_ticket::execute(
                state,
                &self.catalog,
                self.time_provider.as_ref(),
                service_type,
                events,
            )
        })
    }

    /// Assign the next eligible ticket to `counter`.
    ///
    /// `Ok(None)` means every eligible queue is empty; the counter stays Available.
    pub fn call_next(&self, counter: CounterNumber) -> Result<Option<Ticket>> {
        self.transact(|state, events| call_next::execute(state, counter, events))
    }

    /// Finish the ticket currently at a counter and free the counter
    pub fn complete_service(&self, ticket_number: &str) -> Result<FinishedTicket> {
        self.transact(|state, events| finish::complete(state, ticket_number, events))
    }

    /// Customer arrived at the counter: Called -> Serving
    pub fn begin_service(&self, ticket_number: &str) -> Result<Ticket> {
        self.transact(|state, events| finish::begin_service(state, ticket_number, events))
    }

    /// Customer never showed up; the counter becomes Available again
    pub fn mark_no_show(&self, ticket_number: &str) -> Result<FinishedTicket> {
        self.transact(|state, events| finish::no_show(state, ticket_number, events))
    }

    /// Withdraw a ticket that is still waiting
    pub fn cancel_ticket(&self, ticket_number: &str) -> Result<Ticket> {
        self.transact(|state, events| finish::cancel(state, ticket_number, events))
    }

    /// Administrative counter toggle (Available / Closed / Break)
    pub fn set_counter_status(&self, counter: CounterNumber, status: CounterStatus) -> Result<Counter> {
        self.transact(|state, events| {
            let counter = state.counters.set_status(counter, status)?.clone();
            info!(counter = counter.number, status = %counter.status, "Counter status changed");
            events.push(QueueEvent::CounterUpdated {
                counter: counter.clone(),
            });
            Ok(counter)
        })
    }

    // ------------------------------------------------------------------------
    // Queries (snapshots, no side effects)
    // ------------------------------------------------------------------------

    pub fn list_waiting_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.lock()?.queues.waiting())
    }

    pub fn list_counters(&self) -> Result<Vec<Counter>> {
        Ok(self.lock()?.counters.list_all())
    }

    pub fn list_service_types(&self) -> Vec<ServiceTypeDef> {
        self.catalog.list_all().to_vec()
    }

    pub fn counter(&self, number: CounterNumber) -> Result<Counter> {
        Ok(self.lock()?.counters.get(number)?.clone())
    }

    /// A live ticket (waiting or at a counter); terminal tickets are gone
    pub fn ticket(&self, ticket_number: &str) -> Result<Option<Ticket>> {
        let state = self.lock()?;
        Ok(state
            .queues
            .find(ticket_number)
            .or_else(|| state.at_counters.get(ticket_number))
            .cloned())
    }

    pub fn stats(&self) -> Result<DispatchStats> {
        let state = self.lock()?;
        let queues: Vec<QueueLength> = state
            .queues
            .lengths()
            .into_iter()
            .map(|(service_type, waiting)| QueueLength {
                service_type,
                waiting,
            })
            .collect();
        Ok(DispatchStats {
            total_waiting: state.queues.total_waiting(),
            queues,
            at_counters: state.at_counters.len(),
            counters_available: state.counters.count_in(CounterStatus::Available),
            counters_serving: state.counters.count_in(CounterStatus::Serving),
            counters_closed: state.counters.count_in(CounterStatus::Closed),
            counters_on_break: state.counters.count_in(CounterStatus::Break),
        })
    }

    // ------------------------------------------------------------------------

    fn lock(&self) -> Result<MutexGuard<'_, DispatchState>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("dispatch state lock poisoned".to_string()))
    }

    /// Run `op` under the state lock and publish the events it produced.
    ///
    /// A failing `op` must leave the state untouched; its events are dropped.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut DispatchState, &mut Vec<QueueEvent>) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.lock()?;
        let mut events = Vec::new();
        let output = op(&mut *state, &mut events).inspect_err(|err| {
            debug!(error = %err, "Dispatch operation rejected");
        })?;
        for event in events {
            self.event_sink.publish(event);
        }
        drop(state);
        Ok(output)
    }
}
