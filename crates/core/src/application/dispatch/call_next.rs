// Call Next Use Case

use super::DispatchState;
use crate::domain::{CounterNumber, CounterStatus, QueueEvent, Ticket, TicketStatus};
use crate::error::{AppError, Result};
use tracing::{debug, info};

/// Assign the head of the first non-empty eligible queue to `counter_number`.
///
/// Eligible service types are scanned in the counter's configured order, so a
/// counter listing `[express, general]` always drains express first. Returns
/// `Ok(None)` when every eligible queue is empty; the counter is left Available.
pub fn execute(
    state: &mut DispatchState,
    counter_number: CounterNumber,
    events: &mut Vec<QueueEvent>,
) -> Result<Option<Ticket>> {
    let counter = state.counters.get(counter_number)?;
    if counter.status != CounterStatus::Available {
        return Err(AppError::CounterNotAvailable {
            counter: counter_number,
            status: counter.status,
        });
    }

    let Some(service_type) = counter
        .service_types
        .iter()
        .find(|id| !state.queues.is_empty(id))
        .cloned()
    else {
        debug!(counter = counter_number, "No ticket waiting for counter");
        return Ok(None);
    };

    let Some(mut ticket) = state.queues.dequeue(&service_type) else {
        return Err(AppError::Internal(format!(
            "queue '{}' emptied during selection",
            service_type
        )));
    };

    // The ticket goes back to the head of its queue if the assignment fails
    let assigned = ticket.call(counter_number).map_err(AppError::from).and_then(|()| {
        state
            .counters
            .set_serving(counter_number, ticket.number.clone())
            .cloned()
    });
    let counter = match assigned {
        Ok(counter) => counter,
        Err(err) => {
            ticket.status = TicketStatus::Waiting;
            ticket.counter = None;
            state.queues.restore_front(&service_type, ticket);
            return Err(err);
        }
    };
    state.at_counters.insert(ticket.number.clone(), ticket.clone());

    info!(
        ticket = %ticket.number,
        counter = counter_number,
        service_type = %service_type,
        "Ticket called"
    );
    events.push(QueueEvent::TicketCalled {
        ticket_number: ticket.number.clone(),
        counter_number,
        service_type,
    });
    events.push(QueueEvent::CounterUpdated { counter });
    Ok(Some(ticket))
}
