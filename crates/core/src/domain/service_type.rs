// Service Type Domain Model

use serde::{Deserialize, Serialize};

/// Service type identifier (e.g. "general", "express")
pub type ServiceTypeId = String;

/// Priority (higher number = more urgent)
pub type Priority = i32;

/// Definition of a service customers can draw tickets for.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTypeDef {
    pub id: ServiceTypeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub average_processing_time_minutes: u32,
    #[serde(default)]
    pub default_priority: Priority,
    pub ticket_prefix: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ServiceTypeDef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        average_processing_time_minutes: u32,
        default_priority: Priority,
        ticket_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            average_processing_time_minutes,
            default_priority,
            ticket_prefix: ticket_prefix.into(),
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
