// Queue Store - one FIFO of waiting tickets per service type

use super::counter_registry::CounterRegistry;
use crate::domain::{ServiceTypeId, Ticket};
use crate::error::{AppError, Result};
use std::collections::{HashMap, VecDeque};

/// Waiting tickets, strictly FIFO within a service type.
///
/// Cross-service selection policy lives in the dispatch engine, not here.
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    queues: HashMap<ServiceTypeId, VecDeque<Ticket>>,
    /// Registration order, used for stable snapshots
    order: Vec<ServiceTypeId>,
}

impl QueueStore {
    /// Create an empty queue for every service type id
    pub fn new<I, S>(service_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::default();
        for id in service_types {
            let id = id.into();
            if !store.queues.contains_key(&id) {
                store.queues.insert(id.clone(), VecDeque::new());
                store.order.push(id);
            }
        }
        store
    }

    /// Append a Waiting ticket to the tail of `service_type`'s queue
    pub fn enqueue(&mut self, service_type: &str, ticket: Ticket) -> Result<()> {
        if ticket.service_type != service_type {
            return Err(AppError::Validation(format!(
                "ticket {} belongs to '{}', not '{}'",
                ticket.number, ticket.service_type, service_type
            )));
        }
        let queue = self
            .queues
            .get_mut(service_type)
            .ok_or_else(|| AppError::UnknownServiceType(service_type.to_string()))?;
        queue.push_back(ticket);
        Ok(())
    }

    /// Remove and return the earliest waiting ticket of `service_type`
    pub fn dequeue(&mut self, service_type: &str) -> Option<Ticket> {
        self.queues.get_mut(service_type)?.pop_front()
    }

    /// Put a ticket back at the head of its queue (undo of `dequeue`)
    pub fn restore_front(&mut self, service_type: &str, ticket: Ticket) {
        if let Some(queue) = self.queues.get_mut(service_type) {
            queue.push_front(ticket);
        }
    }

    pub fn peek(&self, service_type: &str) -> Option<&Ticket> {
        self.queues.get(service_type)?.front()
    }

    pub fn len(&self, service_type: &str) -> usize {
        self.queues.get(service_type).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, service_type: &str) -> bool {
        self.len(service_type) == 0
    }

    pub fn total_waiting(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Counters currently Available and eligible for `service_type`
    pub fn available_for(&self, service_type: &str, counters: &CounterRegistry) -> usize {
        counters.available_for(service_type)
    }

    /// Pull a specific waiting ticket out of whichever queue holds it
    pub fn remove(&mut self, ticket_number: &str) -> Option<Ticket> {
        self.queues.values_mut().find_map(|queue| {
            let position = queue
                .iter()
                .position(|ticket| ticket.number == ticket_number)?;
            queue.remove(position)
        })
    }

    pub fn find(&self, ticket_number: &str) -> Option<&Ticket> {
        self.queues
            .values()
            .flat_map(|queue| queue.iter())
            .find(|ticket| ticket.number == ticket_number)
    }

    /// Snapshot of waiting tickets: service types in registration order, FIFO within each
    pub fn waiting(&self) -> Vec<Ticket> {
        self.order
            .iter()
            .filter_map(|id| self.queues.get(id))
            .flat_map(|queue| queue.iter().cloned())
            .collect()
    }

    /// Waiting count per service type in registration order
    pub fn lengths(&self) -> Vec<(ServiceTypeId, usize)> {
        self.order
            .iter()
            .map(|id| (id.clone(), self.len(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(number: &str, service_type: &str) -> Ticket {
        Ticket::new(number, service_type, 1, 0, 0)
    }

    #[test]
    fn test_fifo_per_service_type() {
        let mut store = QueueStore::new(["general", "express"]);
        store.enqueue("general", ticket("A1", "general")).unwrap();
        store.enqueue("general", ticket("A2", "general")).unwrap();

        assert_eq!(store.peek("general").unwrap().number, "A1");
        assert_eq!(store.dequeue("general").unwrap().number, "A1");
        assert_eq!(store.dequeue("general").unwrap().number, "A2");
        assert!(store.dequeue("general").is_none());
    }

    #[test]
    fn test_queues_are_independent() {
        let mut store = QueueStore::new(["general", "express"]);
        store.enqueue("express", ticket("E1", "express")).unwrap();
        store.enqueue("general", ticket("A1", "general")).unwrap();

        assert_eq!(store.len("general"), 1);
        assert_eq!(store.len("express"), 1);
        assert_eq!(store.total_waiting(), 2);
        assert_eq!(store.dequeue("express").unwrap().number, "E1");
        assert!(store.is_empty("express"));
    }

    #[test]
    fn test_unknown_queue_and_mismatched_ticket() {
        let mut store = QueueStore::new(["general"]);
        assert_eq!(
            store.enqueue("vip", ticket("V1", "vip")).unwrap_err(),
            AppError::UnknownServiceType("vip".to_string())
        );
        assert!(matches!(
            store.enqueue("general", ticket("V1", "vip")),
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.len("vip"), 0);
        assert!(store.dequeue("vip").is_none());
    }

    #[test]
    fn test_remove_keeps_order_of_remaining() {
        let mut store = QueueStore::new(["general"]);
        for number in ["A1", "A2", "A3"] {
            store.enqueue("general", ticket(number, "general")).unwrap();
        }
        assert_eq!(store.remove("A2").unwrap().number, "A2");
        assert!(store.remove("A2").is_none());
        assert!(store.find("A2").is_none());
        assert!(store.find("A3").is_some());

        let numbers: Vec<String> = store.waiting().into_iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec!["A1", "A3"]);
    }

    #[test]
    fn test_waiting_snapshot_in_registration_order() {
        let mut store = QueueStore::new(["general", "express", "vip"]);
        store.enqueue("vip", ticket("V1", "vip")).unwrap();
        store.enqueue("general", ticket("A1", "general")).unwrap();
        store.enqueue("express", ticket("E1", "express")).unwrap();

        let numbers: Vec<String> = store.waiting().into_iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec!["A1", "E1", "V1"]);
        assert_eq!(
            store.lengths(),
            vec![
                ("general".to_string(), 1),
                ("express".to_string(), 1),
                ("vip".to_string(), 1)
            ]
        );
    }
}
