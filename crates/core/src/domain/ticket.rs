// Ticket Domain Model

use super::counter::CounterNumber;
use super::error::{DomainError, Result};
use super::service_type::{Priority, ServiceTypeId};
use serde::{Deserialize, Serialize};

/// Ticket number (`<prefix><YYMMDD><NNN>`, e.g. "A261017001")
pub type TicketNumber = String;

/// Ticket lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Waiting,
    Called,
    Serving,
    Completed,
    NoShow,
    Cancelled,
}

impl TicketStatus {
    /// Terminal tickets leave the live working set
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TicketStatus::Completed | TicketStatus::NoShow | TicketStatus::Cancelled
        )
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Waiting => write!(f, "WAITING"),
            TicketStatus::Called => write!(f, "CALLED"),
            TicketStatus::Serving => write!(f, "SERVING"),
            TicketStatus::Completed => write!(f, "COMPLETED"),
            TicketStatus::NoShow => write!(f, "NO_SHOW"),
            TicketStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Ticket Entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub number: TicketNumber,
    pub service_type: ServiceTypeId,
    pub priority: Priority,
    pub created_at: i64, // epoch ms
    pub status: TicketStatus,
    pub counter: Option<CounterNumber>,
    /// Snapshot taken at creation, never recomputed
    pub estimated_wait_minutes: u32,
}

impl Ticket {
    /// Create a new Waiting ticket
    ///
    /// # Arguments
    ///
    /// * `number` - Ticket number (allocated by the sequencer, not generated here)
    /// * `service_type` - Service type the ticket waits for
    /// * `priority` - Copied from the service type default
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    /// * `estimated_wait_minutes` - Wait estimate at creation time
    pub fn new(
        number: impl Into<String>,
        service_type: impl Into<String>,
        priority: Priority,
        created_at: i64,
        estimated_wait_minutes: u32,
    ) -> Self {
        Self {
            number: number.into(),
            service_type: service_type.into(),
            priority,
            created_at,
            status: TicketStatus::Waiting,
            counter: None,
            estimated_wait_minutes,
        }
    }

    /// Waiting -> Called, assigning the ticket to a counter
    pub fn call(&mut self, counter: CounterNumber) -> Result<()> {
        if self.status != TicketStatus::Waiting {
            return Err(self.invalid_transition(TicketStatus::Called));
        }
        self.status = TicketStatus::Called;
        self.counter = Some(counter);
        Ok(())
    }

    /// Called -> Serving
    pub fn begin_service(&mut self) -> Result<()> {
        if self.status != TicketStatus::Called {
            return Err(self.invalid_transition(TicketStatus::Serving));
        }
        self.status = TicketStatus::Serving;
        Ok(())
    }

    /// Called | Serving -> Completed
    pub fn complete(&mut self) -> Result<()> {
        self.finish_at_counter(TicketStatus::Completed)
    }

    /// Called | Serving -> NoShow
    pub fn mark_no_show(&mut self) -> Result<()> {
        self.finish_at_counter(TicketStatus::NoShow)
    }

    /// Waiting -> Cancelled
    pub fn cancel(&mut self) -> Result<()> {
        if self.status != TicketStatus::Waiting {
            return Err(self.invalid_transition(TicketStatus::Cancelled));
        }
        self.status = TicketStatus::Cancelled;
        Ok(())
    }

    fn finish_at_counter(&mut self, to: TicketStatus) -> Result<()> {
        if !matches!(self.status, TicketStatus::Called | TicketStatus::Serving) {
            return Err(self.invalid_transition(to));
        }
        self.status = to;
        Ok(())
    }

    fn invalid_transition(&self, to: TicketStatus) -> DomainError {
        DomainError::InvalidStateTransition {
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}
