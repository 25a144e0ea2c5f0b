// Domain Events - produced by the dispatch engine for fan-out

use super::counter::{Counter, CounterNumber};
use super::service_type::ServiceTypeId;
use super::ticket::{Ticket, TicketNumber, TicketStatus};
use serde::{Deserialize, Serialize};

/// State change notification pushed to the `EventSink`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    TicketCreated {
        ticket: Ticket,
    },
    TicketCalled {
        ticket_number: TicketNumber,
        counter_number: CounterNumber,
        service_type: ServiceTypeId,
    },
    CounterUpdated {
        counter: Counter,
    },
    TicketUpdated {
        ticket_number: TicketNumber,
        status: TicketStatus,
        service_type: ServiceTypeId,
    },
}

impl QueueEvent {
    /// Whether an observer interested in `service_types` should see this event.
    ///
    /// An empty interest list matches everything.
    pub fn concerns_any(&self, service_types: &[ServiceTypeId]) -> bool {
        if service_types.is_empty() {
            return true;
        }
        match self {
            QueueEvent::TicketCreated { ticket } => service_types.contains(&ticket.service_type),
            QueueEvent::TicketCalled { service_type, .. }
            | QueueEvent::TicketUpdated { service_type, .. } => {
                service_types.contains(service_type)
            }
            QueueEvent::CounterUpdated { counter } => service_types
                .iter()
                .any(|id| counter.is_eligible_for(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = QueueEvent::TicketCalled {
            ticket_number: "E261017002".to_string(),
            counter_number: 2,
            service_type: "express".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "ticket_called");
        assert_eq!(value["counter_number"], 2);
    }

    #[test]
    fn test_interest_filter() {
        let created = QueueEvent::TicketCreated {
            ticket: Ticket::new("V261017001", "vip", 3, 0, 0),
        };
        assert!(created.concerns_any(&[]));
        assert!(created.concerns_any(&["vip".to_string()]));
        assert!(!created.concerns_any(&["general".to_string()]));

        let counter = QueueEvent::CounterUpdated {
            counter: Counter::new(1, "Counter 1", ["general", "express"]),
        };
        assert!(counter.concerns_any(&["express".to_string()]));
        assert!(!counter.concerns_any(&["vip".to_string()]));
    }
}
