// Counter Domain Model

use super::service_type::ServiceTypeId;
use super::ticket::TicketNumber;
use serde::{Deserialize, Serialize};

/// Counter number (positive, stable identity)
pub type CounterNumber = u32;

/// Counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterStatus {
    Available,
    Serving,
    Closed,
    Break,
}

impl std::fmt::Display for CounterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterStatus::Available => write!(f, "AVAILABLE"),
            CounterStatus::Serving => write!(f, "SERVING"),
            CounterStatus::Closed => write!(f, "CLOSED"),
            CounterStatus::Break => write!(f, "BREAK"),
        }
    }
}

impl std::str::FromStr for CounterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(CounterStatus::Available),
            "SERVING" => Ok(CounterStatus::Serving),
            "CLOSED" => Ok(CounterStatus::Closed),
            "BREAK" => Ok(CounterStatus::Break),
            other => Err(format!("unknown counter status '{}'", other)),
        }
    }
}

/// Counter Entity
///
/// `current_ticket` is set if and only if `status` is `Serving`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub number: CounterNumber,
    pub name: String,
    pub status: CounterStatus,
    /// Eligible service types; the order is the selection precedence
    pub service_types: Vec<ServiceTypeId>,
    pub current_ticket: Option<TicketNumber>,
    pub current_operator: Option<String>,
}

impl Counter {
    /// Create an Available counter
    pub fn new<I, S>(number: CounterNumber, name: impl Into<String>, service_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            number,
            name: name.into(),
            status: CounterStatus::Available,
            service_types: service_types.into_iter().map(Into::into).collect(),
            current_ticket: None,
            current_operator: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == CounterStatus::Available
    }

    pub fn is_eligible_for(&self, service_type: &str) -> bool {
        self.service_types.iter().any(|id| id == service_type)
    }

    /// Check the `current_ticket <=> Serving` invariant
    pub fn is_consistent(&self) -> bool {
        (self.status == CounterStatus::Serving) == self.current_ticket.is_some()
    }
}
