// Counter-side Use Cases: begin, complete, no-show, cancel

use super::{DispatchState, FinishedTicket};
use crate::domain::{QueueEvent, Ticket, TicketStatus};
use crate::error::{AppError, Result};
use tracing::info;

/// Called -> Serving for the ticket at a counter
pub fn begin_service(
    state: &mut DispatchState,
    ticket_number: &str,
    events: &mut Vec<QueueEvent>,
) -> Result<Ticket> {
    let counter = state
        .counters
        .find_serving(ticket_number)
        .ok_or_else(|| AppError::TicketNotAtAnyCounter(ticket_number.to_string()))?;
    let ticket = state
        .at_counters
        .get_mut(ticket_number)
        .ok_or_else(|| missing_record(ticket_number))?;
    ticket.begin_service()?;

    info!(ticket = %ticket.number, counter, "Service started");
    events.push(QueueEvent::TicketUpdated {
        ticket_number: ticket.number.clone(),
        status: ticket.status,
        service_type: ticket.service_type.clone(),
    });
    Ok(ticket.clone())
}

/// Ticket served: Completed, counter back to Available
pub fn complete(
    state: &mut DispatchState,
    ticket_number: &str,
    events: &mut Vec<QueueEvent>,
) -> Result<FinishedTicket> {
    release(state, ticket_number, TicketStatus::Completed, events)
}

/// Customer absent: NoShow, counter back to Available
pub fn no_show(
    state: &mut DispatchState,
    ticket_number: &str,
    events: &mut Vec<QueueEvent>,
) -> Result<FinishedTicket> {
    release(state, ticket_number, TicketStatus::NoShow, events)
}

/// Withdraw a Waiting ticket from its queue
pub fn cancel(
    state: &mut DispatchState,
    ticket_number: &str,
    events: &mut Vec<QueueEvent>,
) -> Result<Ticket> {
    let mut ticket = state
        .queues
        .remove(ticket_number)
        .ok_or_else(|| AppError::TicketNotWaiting(ticket_number.to_string()))?;
    // Only Waiting tickets live in queues
    ticket.cancel()?;

    info!(ticket = %ticket.number, service_type = %ticket.service_type, "Ticket cancelled");
    events.push(QueueEvent::TicketUpdated {
        ticket_number: ticket.number.clone(),
        status: ticket.status,
        service_type: ticket.service_type.clone(),
    });
    Ok(ticket)
}

/// Finish the ticket at a counter with `outcome` and free the counter.
///
/// Every check happens before the first mutation so a rejected call leaves
/// both the ticket and the counter as they were.
fn release(
    state: &mut DispatchState,
    ticket_number: &str,
    outcome: TicketStatus,
    events: &mut Vec<QueueEvent>,
) -> Result<FinishedTicket> {
    let counter_number = state
        .counters
        .find_serving(ticket_number)
        .ok_or_else(|| AppError::TicketNotAtAnyCounter(ticket_number.to_string()))?;

    let mut ticket = state
        .at_counters
        .get(ticket_number)
        .cloned()
        .ok_or_else(|| missing_record(ticket_number))?;
    match outcome {
        TicketStatus::Completed => ticket.complete()?,
        TicketStatus::NoShow => ticket.mark_no_show()?,
        other => {
            return Err(AppError::Internal(format!(
                "{} is not a counter outcome",
                other
            )))
        }
    }

    let (counter, _) = state.counters.set_available(counter_number)?;
    let counter = counter.clone();
    state.at_counters.remove(ticket_number);

    info!(
        ticket = %ticket.number,
        counter = counter_number,
        status = %ticket.status,
        "Ticket left counter"
    );
    events.push(QueueEvent::TicketUpdated {
        ticket_number: ticket.number.clone(),
        status: ticket.status,
        service_type: ticket.service_type.clone(),
    });
    events.push(QueueEvent::CounterUpdated {
        counter: counter.clone(),
    });
    Ok(FinishedTicket { ticket, counter })
}

fn missing_record(ticket_number: &str) -> AppError {
    AppError::Internal(format!(
        "counter serves {} but no ticket record exists",
        ticket_number
    ))
}
