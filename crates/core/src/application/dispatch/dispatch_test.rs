//! Unit tests for the dispatch engine use cases

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::application::layout::CounterSpec;
    use crate::domain::TicketStatus;
    use crate::port::event_sink::mocks::RecordingEventSink;
    use crate::port::event_sink::NullEventSink;
    use crate::port::time_provider::mocks::FixedTimeProvider;
    use chrono::NaiveDate;

    struct Harness {
        engine: DispatchEngine,
        events: Arc<RecordingEventSink>,
        clock: Arc<FixedTimeProvider>,
    }

    fn counter(number: u32, service_types: &[&str]) -> CounterSpec {
        CounterSpec {
            number,
            name: format!("Counter {}", number),
            service_types: service_types.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn harness(counters: Vec<CounterSpec>) -> Harness {
        let layout = FloorLayout {
            counters,
            ..FloorLayout::default()
        };
        let events = Arc::new(RecordingEventSink::new());
        let clock = Arc::new(FixedTimeProvider::ymd(2026, 10, 17));
        let engine = DispatchEngine::from_layout(&layout, events.clone(), clock.clone()).unwrap();
        Harness {
            engine,
            events,
            clock,
        }
    }

    fn default_floor() -> Harness {
        let events = Arc::new(RecordingEventSink::new());
        let clock = Arc::new(FixedTimeProvider::ymd(2026, 10, 17));
        let engine =
            DispatchEngine::from_layout(&FloorLayout::default(), events.clone(), clock.clone())
                .unwrap();
        Harness {
            engine,
            events,
            clock,
        }
    }

    fn numbers(tickets: &[Ticket]) -> Vec<&str> {
        tickets.iter().map(|t| t.number.as_str()).collect()
    }

    // ------------------------------------------------------------------------
    // CreateTicket
    // ------------------------------------------------------------------------

    #[test]
    fn test_create_ticket_assigns_dated_sequence() {
        let h = default_floor();
        let first = h.engine.create_ticket("general").unwrap();
        let second = h.engine.create_ticket("general").unwrap();
        let vip = h.engine.create_ticket("vip").unwrap();

        assert_eq!(first.number, "A261017001");
        assert_eq!(second.number, "A261017002");
        assert_eq!(vip.number, "V261017001");
        assert_eq!(first.status, TicketStatus::Waiting);
        assert_eq!(first.priority, 1);
        assert_eq!(vip.priority, 3);
        assert!(first.counter.is_none());
        assert!(second.created_at > first.created_at);
    }

    #[test]
    fn test_ticket_numbers_never_repeat_after_queue_drains() {
        let h = harness(vec![counter(1, &["general"])]);
        let first = h.engine.create_ticket("general").unwrap();
        h.engine.call_next(1).unwrap();
        h.engine.complete_service(&first.number).unwrap();

        let next = h.engine.create_ticket("general").unwrap();
        assert_eq!(next.number, "A261017002");
    }

    #[test]
    fn test_sequence_restarts_on_new_day() {
        let h = default_floor();
        h.engine.create_ticket("express").unwrap();
        h.engine.create_ticket("express").unwrap();

        h.clock
            .set_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let ticket = h.engine.create_ticket("express").unwrap();
        assert_eq!(ticket.number, "E261018001");
    }

    #[test]
    fn test_engine_runs_without_observers() {
        let engine = DispatchEngine::from_layout(
            &FloorLayout::default(),
            Arc::new(NullEventSink),
            Arc::new(FixedTimeProvider::ymd(2026, 10, 17)),
        )
        .unwrap();
        let ticket = engine.create_ticket("vip").unwrap();
        let called = engine.call_next(6).unwrap().unwrap();
        assert_eq!(called.number, ticket.number);
    }

    #[test]
    fn test_clock_stepping_back_keeps_numbers_unique() {
        let h = default_floor();
        h.engine.create_ticket("general").unwrap();
        h.clock
            .set_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        h.engine.create_ticket("general").unwrap();
        h.clock
            .set_date(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        h.engine.create_ticket("general").unwrap();

        let waiting = h.engine.list_waiting_tickets().unwrap();
        assert_eq!(
            numbers(&waiting),
            vec!["A261017001", "A261018001", "A261018002"]
        );
    }

    #[test]
    fn test_estimate_counts_available_eligible_counters() {
        let h = harness(vec![counter(1, &["general"]), counter(2, &["general"])]);
        let estimates: Vec<u32> = (0..4)
            .map(|_| h.engine.create_ticket("general").unwrap().estimated_wait_minutes)
            .collect();
        // avg 10 min, two counters: ceil(n * 10 / 2)
        assert_eq!(estimates, vec![0, 5, 10, 15]);

        h.engine
            .set_counter_status(2, CounterStatus::Break)
            .unwrap();
        let fifth = h.engine.create_ticket("general").unwrap();
        assert_eq!(fifth.estimated_wait_minutes, 40);
    }

    #[test]
    fn test_estimate_divides_by_one_when_no_counter_available() {
        let h = harness(vec![counter(1, &["vip"])]);
        h.engine.set_counter_status(1, CounterStatus::Closed).unwrap();
        h.engine.create_ticket("vip").unwrap();
        let second = h.engine.create_ticket("vip").unwrap();
        assert_eq!(second.estimated_wait_minutes, 15);
    }

    #[test]
    fn test_estimate_uses_ceiling_division() {
        assert_eq!(estimate_wait_minutes(0, 10, 3), 0);
        assert_eq!(estimate_wait_minutes(1, 10, 3), 4);
        assert_eq!(estimate_wait_minutes(3, 5, 2), 8);
        assert_eq!(estimate_wait_minutes(2, 10, 0), 20);
        assert_eq!(estimate_wait_minutes(usize::MAX, u32::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_create_unknown_service_changes_nothing() {
        let h = default_floor();
        let err = h.engine.create_ticket("unknown").unwrap_err();
        assert_eq!(err, AppError::UnknownServiceType("unknown".to_string()));
        assert!(h.engine.list_waiting_tickets().unwrap().is_empty());
        assert!(h.events.events().is_empty());

        // The failed attempt did not consume a sequence number
        assert_eq!(
            h.engine.create_ticket("general").unwrap().number,
            "A261017001"
        );
    }

    #[test]
    fn test_create_inactive_service_is_rejected() {
        let mut layout = FloorLayout::default();
        layout.service_types[2] = layout.service_types[2].clone().inactive();
        let engine = DispatchEngine::from_layout(
            &layout,
            Arc::new(RecordingEventSink::new()),
            Arc::new(FixedTimeProvider::ymd(2026, 10, 17)),
        )
        .unwrap();

        assert!(matches!(
            engine.create_ticket("vip"),
            Err(AppError::UnknownServiceType(_))
        ));
        // Still listed
        assert_eq!(engine.list_service_types().len(), 3);
    }

    #[test]
    fn test_create_emits_ticket_created() {
        let h = default_floor();
        let ticket = h.engine.create_ticket("vip").unwrap();
        assert_eq!(h.events.take(), vec![QueueEvent::TicketCreated { ticket }]);
    }

    // ------------------------------------------------------------------------
    // CallNext
    // ------------------------------------------------------------------------

    #[test]
    fn test_basic_scenario() {
        let h = harness(vec![counter(1, &["general"])]);

        let created = h.engine.create_ticket("general").unwrap();
        assert_eq!(created.number, "A261017001");
        assert_eq!(created.estimated_wait_minutes, 0);

        let called = h.engine.call_next(1).unwrap().unwrap();
        assert_eq!(called.number, created.number);
        assert_eq!(called.status, TicketStatus::Called);
        assert_eq!(called.counter, Some(1));

        let c1 = h.engine.counter(1).unwrap();
        assert_eq!(c1.status, CounterStatus::Serving);
        assert_eq!(c1.current_ticket.as_deref(), Some("A261017001"));

        let finished = h.engine.complete_service("A261017001").unwrap();
        assert_eq!(finished.ticket.status, TicketStatus::Completed);
        assert_eq!(finished.counter.status, CounterStatus::Available);
        assert!(finished.counter.current_ticket.is_none());
        assert_eq!(h.engine.counter(1).unwrap(), finished.counter);
        assert!(h.engine.ticket("A261017001").unwrap().is_none());
    }

    #[test]
    fn test_call_next_prefers_configured_order_over_arrival() {
        let h = harness(vec![counter(1, &["express", "general"])]);
        h.engine.create_ticket("general").unwrap();
        h.engine.create_ticket("express").unwrap();

        let first = h.engine.call_next(1).unwrap().unwrap();
        assert_eq!(first.service_type, "express");
    }

    #[test]
    fn test_call_next_is_fifo_within_service_type() {
        let h = harness(vec![counter(1, &["general"]), counter(2, &["general"])]);
        for _ in 0..3 {
            h.engine.create_ticket("general").unwrap();
        }

        assert_eq!(h.engine.call_next(1).unwrap().unwrap().number, "A261017001");
        assert_eq!(h.engine.call_next(2).unwrap().unwrap().number, "A261017002");
        assert_eq!(
            numbers(&h.engine.list_waiting_tickets().unwrap()),
            vec!["A261017003"]
        );
    }

    #[test]
    fn test_call_next_skips_ineligible_queues() {
        let h = default_floor();
        h.engine.create_ticket("vip").unwrap();
        assert!(h.engine.call_next(1).unwrap().is_none());
        assert_eq!(h.engine.counter(1).unwrap().status, CounterStatus::Available);
        assert_eq!(h.engine.call_next(6).unwrap().unwrap().service_type, "vip");
    }

    #[test]
    fn test_call_next_with_empty_queues_returns_none() {
        let h = default_floor();
        assert_eq!(h.engine.call_next(3).unwrap(), None);
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_call_next_on_serving_counter_dequeues_nothing() {
        let h = harness(vec![counter(1, &["general"])]);
        h.engine.create_ticket("general").unwrap();
        h.engine.create_ticket("general").unwrap();
        h.engine.call_next(1).unwrap();
        h.events.take();

        let err = h.engine.call_next(1).unwrap_err();
        assert_eq!(
            err,
            AppError::CounterNotAvailable {
                counter: 1,
                status: CounterStatus::Serving
            }
        );
        assert_eq!(
            numbers(&h.engine.list_waiting_tickets().unwrap()),
            vec!["A261017002"]
        );
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_call_next_on_closed_or_unknown_counter() {
        let h = default_floor();
        h.engine.create_ticket("general").unwrap();
        h.engine.set_counter_status(2, CounterStatus::Closed).unwrap();

        assert!(matches!(
            h.engine.call_next(2),
            Err(AppError::CounterNotAvailable {
                status: CounterStatus::Closed,
                ..
            })
        ));
        assert_eq!(h.engine.call_next(42).unwrap_err(), AppError::UnknownCounter(42));
        assert_eq!(h.engine.list_waiting_tickets().unwrap().len(), 1);
    }

    #[test]
    fn test_call_next_emits_called_then_counter_updated() {
        let h = harness(vec![counter(1, &["general"])]);
        h.engine.create_ticket("general").unwrap();
        h.events.take();

        h.engine.call_next(1).unwrap();
        let events = h.events.take();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            QueueEvent::TicketCalled {
                ticket_number: "A261017001".to_string(),
                counter_number: 1,
                service_type: "general".to_string(),
            }
        );
        match &events[1] {
            QueueEvent::CounterUpdated { counter } => {
                assert_eq!(counter.status, CounterStatus::Serving);
                assert_eq!(counter.current_ticket.as_deref(), Some("A261017001"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    // ------------------------------------------------------------------------
    // Begin / Complete / NoShow / Cancel
    // ------------------------------------------------------------------------

    #[test]
    fn test_begin_service_then_complete() {
        let h = harness(vec![counter(1, &["general"])]);
        let ticket = h.engine.create_ticket("general").unwrap();
        h.engine.call_next(1).unwrap();

        let serving = h.engine.begin_service(&ticket.number).unwrap();
        assert_eq!(serving.status, TicketStatus::Serving);
        assert_eq!(
            h.engine.ticket(&ticket.number).unwrap().unwrap().status,
            TicketStatus::Serving
        );
        assert!(h.engine.begin_service(&ticket.number).is_err());

        h.events.take();
        h.engine.complete_service(&ticket.number).unwrap();
        let events = h.events.take();
        assert!(matches!(
            events[0],
            QueueEvent::TicketUpdated {
                status: TicketStatus::Completed,
                ..
            }
        ));
        assert!(matches!(events[1], QueueEvent::CounterUpdated { .. }));
    }

    #[test]
    fn test_complete_unassigned_ticket_changes_nothing() {
        let h = harness(vec![counter(1, &["general"])]);
        let waiting = h.engine.create_ticket("general").unwrap();
        h.events.take();

        for number in [waiting.number.as_str(), "A261017999"] {
            assert_eq!(
                h.engine.complete_service(number).unwrap_err(),
                AppError::TicketNotAtAnyCounter(number.to_string())
            );
        }
        assert_eq!(h.engine.list_waiting_tickets().unwrap(), vec![waiting]);
        assert_eq!(h.engine.counter(1).unwrap().status, CounterStatus::Available);
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_completed_ticket_cannot_complete_twice() {
        let h = harness(vec![counter(1, &["general"])]);
        let ticket = h.engine.create_ticket("general").unwrap();
        h.engine.call_next(1).unwrap();
        h.engine.complete_service(&ticket.number).unwrap();

        assert!(matches!(
            h.engine.complete_service(&ticket.number),
            Err(AppError::TicketNotAtAnyCounter(_))
        ));
    }

    #[test]
    fn test_no_show_frees_counter() {
        let h = harness(vec![counter(1, &["general"])]);
        let ticket = h.engine.create_ticket("general").unwrap();
        h.engine.create_ticket("general").unwrap();
        h.engine.call_next(1).unwrap();

        let finished = h.engine.mark_no_show(&ticket.number).unwrap();
        assert_eq!(finished.ticket.status, TicketStatus::NoShow);
        assert_eq!(finished.counter.status, CounterStatus::Available);

        // Counter moves on to the next customer
        assert_eq!(h.engine.call_next(1).unwrap().unwrap().number, "A261017002");
    }

    #[test]
    fn test_cancel_removes_waiting_ticket() {
        let h = harness(vec![counter(1, &["general"])]);
        let first = h.engine.create_ticket("general").unwrap();
        h.engine.create_ticket("general").unwrap();

        let cancelled = h.engine.cancel_ticket(&first.number).unwrap();
        assert_eq!(cancelled.status, TicketStatus::Cancelled);
        assert!(h.engine.ticket(&first.number).unwrap().is_none());
        assert_eq!(h.engine.call_next(1).unwrap().unwrap().number, "A261017002");

        // Called tickets are no longer waiting
        assert_eq!(
            h.engine.cancel_ticket("A261017002").unwrap_err(),
            AppError::TicketNotWaiting("A261017002".to_string())
        );
    }

    // ------------------------------------------------------------------------
    // Counter status and queries
    // ------------------------------------------------------------------------

    #[test]
    fn test_set_counter_status_emits_counter_updated() {
        let h = default_floor();
        let counter = h.engine.set_counter_status(4, CounterStatus::Break).unwrap();
        assert_eq!(counter.status, CounterStatus::Break);
        assert_eq!(h.events.take(), vec![QueueEvent::CounterUpdated { counter }]);

        assert!(h.engine.set_counter_status(4, CounterStatus::Serving).is_err());
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_snapshots_are_stable_without_mutation() {
        let h = default_floor();
        h.engine.create_ticket("general").unwrap();

        assert_eq!(h.engine.list_counters().unwrap(), h.engine.list_counters().unwrap());
        assert_eq!(h.engine.list_service_types(), h.engine.list_service_types());
        assert_eq!(
            h.engine.list_waiting_tickets().unwrap(),
            h.engine.list_waiting_tickets().unwrap()
        );
    }

    #[test]
    fn test_stats_reflect_queues_and_counters() {
        let h = default_floor();
        h.engine.create_ticket("general").unwrap();
        h.engine.create_ticket("general").unwrap();
        h.engine.create_ticket("vip").unwrap();
        h.engine.call_next(6).unwrap();
        h.engine.set_counter_status(5, CounterStatus::Closed).unwrap();

        let stats = h.engine.stats().unwrap();
        assert_eq!(stats.total_waiting, 2);
        assert_eq!(stats.at_counters, 1);
        assert_eq!(
            stats.queues,
            vec![
                QueueLength {
                    service_type: "general".to_string(),
                    waiting: 2
                },
                QueueLength {
                    service_type: "express".to_string(),
                    waiting: 0
                },
                QueueLength {
                    service_type: "vip".to_string(),
                    waiting: 0
                },
            ]
        );
        assert_eq!(stats.counters_available, 4);
        assert_eq!(stats.counters_serving, 1);
        assert_eq!(stats.counters_closed, 1);
        assert_eq!(stats.counters_on_break, 0);
    }

    #[test]
    fn test_concurrent_call_next_never_double_assigns() {
        let h = default_floor();
        for _ in 0..5 {
            h.engine.create_ticket("general").unwrap();
        }
        let engine = Arc::new(h.engine);

        let handles: Vec<_> = (1..=5)
            .map(|counter| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.call_next(counter).unwrap())
            })
            .collect();
        let mut called: Vec<String> = handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap())
            .map(|ticket| ticket.number)
            .collect();
        called.sort();
        called.dedup();

        assert_eq!(called.len(), 5);
        assert!(engine.list_waiting_tickets().unwrap().is_empty());
    }
}
