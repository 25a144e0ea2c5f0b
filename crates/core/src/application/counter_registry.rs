// Counter Registry - counters, their eligibility and current assignment

use super::catalog::ServiceCatalog;
use crate::domain::{Counter, CounterNumber, CounterStatus, TicketNumber};
use crate::error::{AppError, Result};
use std::collections::{BTreeMap, HashSet};

/// Holds every counter keyed by number.
///
/// Mutations validate the current state before applying the status and
/// `current_ticket` update together. The registry is not synchronized on its
/// own: the dispatch engine owns it behind its single lock.
#[derive(Debug, Clone)]
pub struct CounterRegistry {
    counters: BTreeMap<CounterNumber, Counter>,
}

impl CounterRegistry {
    pub fn new(counters: Vec<Counter>, catalog: &ServiceCatalog) -> Result<Self> {
        let mut by_number = BTreeMap::new();
        for counter in counters {
            validate_counter(&counter, catalog)?;
            let number = counter.number;
            if by_number.insert(number, counter).is_some() {
                return Err(AppError::Config(format!(
                    "duplicate counter number {}",
                    number
                )));
            }
        }
        Ok(Self {
            counters: by_number,
        })
    }

    pub fn get(&self, number: CounterNumber) -> Result<&Counter> {
        self.counters
            .get(&number)
            .ok_or(AppError::UnknownCounter(number))
    }

    /// Snapshot of all counters ordered by number
    pub fn list_all(&self) -> Vec<Counter> {
        self.counters.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Available -> Serving with `ticket`
    pub fn set_serving(&mut self, number: CounterNumber, ticket: TicketNumber) -> Result<&Counter> {
        let counter = self.get_mut(number)?;
        if counter.status != CounterStatus::Available {
            return Err(AppError::CounterNotAvailable {
                counter: number,
                status: counter.status,
            });
        }
        counter.status = CounterStatus::Serving;
        counter.current_ticket = Some(ticket);
        Ok(&*counter)
    }

    /// Serving -> Available, returning the ticket that was being served
    pub fn set_available(&mut self, number: CounterNumber) -> Result<(&Counter, TicketNumber)> {
        let counter = self.get_mut(number)?;
        let ticket = match (counter.status, counter.current_ticket.take()) {
            (CounterStatus::Serving, Some(ticket)) => ticket,
            (status, previous) => {
                counter.current_ticket = previous;
                return Err(AppError::Validation(format!(
                    "counter {} is not serving (status: {})",
                    number, status
                )));
            }
        };
        counter.status = CounterStatus::Available;
        Ok((&*counter, ticket))
    }

    /// Administrative toggle between Available, Closed and Break.
    ///
    /// A Serving counter must finish its ticket first; Serving itself is only
    /// reachable through a call.
    pub fn set_status(&mut self, number: CounterNumber, status: CounterStatus) -> Result<&Counter> {
        let counter = self.get_mut(number)?;
        if status == CounterStatus::Serving {
            return Err(AppError::Validation(
                "counter status SERVING is set by calling a ticket".to_string(),
            ));
        }
        if counter.status == CounterStatus::Serving {
            return Err(AppError::CounterNotAvailable {
                counter: number,
                status: counter.status,
            });
        }
        counter.status = status;
        Ok(&*counter)
    }

    /// The only lookup path from a ticket to a counter
    pub fn find_serving(&self, ticket_number: &str) -> Option<CounterNumber> {
        self.counters
            .values()
            .find(|counter| counter.current_ticket.as_deref() == Some(ticket_number))
            .map(|counter| counter.number)
    }

    /// Number of counters that are Available and eligible for `service_type`
    pub fn available_for(&self, service_type: &str) -> usize {
        self.counters
            .values()
            .filter(|counter| counter.is_available() && counter.is_eligible_for(service_type))
            .count()
    }

    /// Number of counters in `status`
    pub fn count_in(&self, status: CounterStatus) -> usize {
        self.counters
            .values()
            .filter(|counter| counter.status == status)
            .count()
    }

    fn get_mut(&mut self, number: CounterNumber) -> Result<&mut Counter> {
        self.counters
            .get_mut(&number)
            .ok_or(AppError::UnknownCounter(number))
    }
}

fn validate_counter(counter: &Counter, catalog: &ServiceCatalog) -> Result<()> {
    if counter.number == 0 {
        return Err(AppError::Config(
            "counter numbers must be positive".to_string(),
        ));
    }
    if counter.service_types.is_empty() {
        return Err(AppError::Config(format!(
            "counter {} must be eligible for at least one service type",
            counter.number
        )));
    }
    let mut seen = HashSet::new();
    for service_type in &counter.service_types {
        if !catalog.contains(service_type) {
            return Err(AppError::Config(format!(
                "counter {} references unknown service type '{}'",
                counter.number, service_type
            )));
        }
        if !seen.insert(service_type.as_str()) {
            return Err(AppError::Config(format!(
                "counter {} lists service type '{}' twice",
                counter.number, service_type
            )));
        }
    }
    if !counter.is_consistent() {
        return Err(AppError::Config(format!(
            "counter {} must have a current ticket exactly when SERVING",
            counter.number
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CounterRegistry {
        CounterRegistry::new(
            vec![
                Counter::new(1, "Counter 1", ["general", "express"]),
                Counter::new(2, "Counter 2", ["general"]),
                Counter::new(6, "VIP Counter", ["vip"]),
            ],
            &ServiceCatalog::builtin(),
        )
        .unwrap()
    }

    #[test]
    fn test_get_and_list_ordered_by_number() {
        let registry = registry();
        assert_eq!(registry.get(6).unwrap().name, "VIP Counter");
        assert_eq!(registry.get(9).unwrap_err(), AppError::UnknownCounter(9));
        let numbers: Vec<u32> = registry.list_all().iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 6]);
    }

    #[test]
    fn test_set_serving_then_available() {
        let mut registry = registry();
        let counter = registry.set_serving(1, "A261017001".to_string()).unwrap();
        assert_eq!(counter.status, CounterStatus::Serving);
        assert_eq!(counter.current_ticket.as_deref(), Some("A261017001"));
        assert_eq!(registry.find_serving("A261017001"), Some(1));

        let (counter, ticket) = registry.set_available(1).unwrap();
        assert_eq!(counter.status, CounterStatus::Available);
        assert!(counter.current_ticket.is_none());
        assert_eq!(ticket, "A261017001");
        assert_eq!(registry.find_serving("A261017001"), None);
    }

    #[test]
    fn test_set_serving_requires_available() {
        let mut registry = registry();
        registry.set_serving(1, "A261017001".to_string()).unwrap();
        let err = registry
            .set_serving(1, "A261017002".to_string())
            .unwrap_err();
        assert_eq!(
            err,
            AppError::CounterNotAvailable {
                counter: 1,
                status: CounterStatus::Serving
            }
        );
        // First assignment untouched
        assert_eq!(
            registry.get(1).unwrap().current_ticket.as_deref(),
            Some("A261017001")
        );
    }

    #[test]
    fn test_set_available_requires_serving() {
        let mut registry = registry();
        assert!(registry.set_available(2).is_err());
        assert!(registry.get(2).unwrap().is_consistent());
    }

    #[test]
    fn test_available_for_counts_only_available_eligible() {
        let mut registry = registry();
        assert_eq!(registry.available_for("general"), 2);
        assert_eq!(registry.available_for("express"), 1);

        registry.set_serving(2, "A261017001".to_string()).unwrap();
        registry.set_status(1, CounterStatus::Break).unwrap();
        assert_eq!(registry.available_for("general"), 0);
        assert_eq!(registry.count_in(CounterStatus::Break), 1);
    }

    #[test]
    fn test_set_status_rules() {
        let mut registry = registry();
        assert!(registry.set_status(1, CounterStatus::Serving).is_err());

        registry.set_status(1, CounterStatus::Closed).unwrap();
        registry.set_status(1, CounterStatus::Available).unwrap();

        registry.set_serving(1, "E261017001".to_string()).unwrap();
        assert!(matches!(
            registry.set_status(1, CounterStatus::Closed),
            Err(AppError::CounterNotAvailable { .. })
        ));
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let catalog = ServiceCatalog::builtin();
        let unknown = CounterRegistry::new(vec![Counter::new(1, "C", ["passport"])], &catalog);
        assert!(unknown.unwrap_err().to_string().contains("unknown service type"));

        let empty = CounterRegistry::new(vec![Counter::new(1, "C", Vec::<String>::new())], &catalog);
        assert!(empty.is_err());

        let zero = CounterRegistry::new(vec![Counter::new(0, "C", ["general"])], &catalog);
        assert!(zero.is_err());

        let duplicate = CounterRegistry::new(
            vec![
                Counter::new(1, "C", ["general"]),
                Counter::new(1, "D", ["vip"]),
            ],
            &catalog,
        );
        assert!(duplicate.unwrap_err().to_string().contains("duplicate counter"));

        let twice = CounterRegistry::new(vec![Counter::new(1, "C", ["vip", "vip"])], &catalog);
        assert!(twice.is_err());
    }
}
