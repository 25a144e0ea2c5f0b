// Create Ticket Use Case

use super::DispatchState;
use crate::application::catalog::ServiceCatalog;
use crate::domain::{QueueEvent, Ticket};
use crate::error::Result;
use crate::port::TimeProvider;
use tracing::info;

/// Execute create-ticket use case
///
/// # Arguments
///
/// * `state` - Locked dispatch state
/// * `catalog` - Service catalog (unknown or inactive types are rejected)
/// * `time_provider` - Clock for the ticket date and timestamp (injected for determinism)
/// * `service_type` - Requested service type id
/// * `events` - Collected events, published by the engine on success
pub fn execute(
    state: &mut DispatchState,
    catalog: &ServiceCatalog,
    time_provider: &dyn TimeProvider,
    service_type: &str,
    events: &mut Vec<QueueEvent>,
) -> Result<Ticket> {
    let service = catalog.get_active(service_type)?;

    // Estimate against the queue as it is before this ticket joins it
    let queue_len = state.queues.len(&service.id);
    let available = state.queues.available_for(&service.id, &state.counters);
    let estimate =
        estimate_wait_minutes(queue_len, service.average_processing_time_minutes, available);

    let number = state
        .sequencer
        .next(&service.ticket_prefix, time_provider.today())?;
    let ticket = Ticket::new(
        number,
        service.id.clone(),
        service.default_priority,
        time_provider.now_millis(),
        estimate,
    );
    state.queues.enqueue(&service.id, ticket.clone())?;

    info!(
        ticket = %ticket.number,
        service_type = %ticket.service_type,
        position = queue_len + 1,
        estimated_wait_minutes = estimate,
        "Ticket created"
    );
    events.push(QueueEvent::TicketCreated {
        ticket: ticket.clone(),
    });
    Ok(ticket)
}

/// `ceil(queue_len * avg_minutes / max(1, available_counters))`, saturating at `u32::MAX`
pub fn estimate_wait_minutes(queue_len: usize, avg_minutes: u32, available_counters: usize) -> u32 {
    let total = (queue_len as u64).saturating_mul(u64::from(avg_minutes));
    let divisor = available_counters.max(1) as u64;
    u32::try_from(total.div_ceil(divisor)).unwrap_or(u32::MAX)
}
