// Central Error Type for the Application

use crate::domain::{CounterNumber, CounterStatus};
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Unknown service type: {0}")]
    UnknownServiceType(String),

    #[error("Unknown counter: {0}")]
    UnknownCounter(CounterNumber),

    #[error("Counter {counter} is not available (status: {status})")]
    CounterNotAvailable {
        counter: CounterNumber,
        status: CounterStatus,
    },

    #[error("Ticket {0} is not at any counter")]
    TicketNotAtAnyCounter(String),

    #[error("Ticket {0} is not waiting in any queue")]
    TicketNotWaiting(String),

    #[error("Ticket sequence exhausted for prefix {prefix} on {date}")]
    SequenceExhausted { prefix: String, date: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by transport layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    Validation,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::UnknownServiceType(_)
            | AppError::UnknownCounter(_)
            | AppError::TicketNotAtAnyCounter(_)
            | AppError::TicketNotWaiting(_) => ErrorKind::NotFound,
            AppError::CounterNotAvailable { .. }
            | AppError::Domain(_)
            | AppError::SequenceExhausted { .. } => ErrorKind::InvalidState,
            AppError::Validation(_) | AppError::Config(_) => ErrorKind::Validation,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
