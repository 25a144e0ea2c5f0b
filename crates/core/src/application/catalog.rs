// Service Catalog - read-mostly registry of service type definitions

use crate::domain::ServiceTypeDef;
use crate::error::{AppError, Result};
use std::collections::{HashMap, HashSet};

/// Static registry of service types, shared read-only by every component
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<ServiceTypeDef>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Build a catalog, validating ids and ticket prefixes.
    ///
    /// Prefixes must be unique (and alphabetic) or ticket numbers of two
    /// service types could collide on the same date and sequence.
    pub fn new(services: Vec<ServiceTypeDef>) -> Result<Self> {
        if services.is_empty() {
            return Err(AppError::Config(
                "service catalog must define at least one service type".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(services.len());
        let mut prefixes = HashSet::with_capacity(services.len());
        for (position, service) in services.iter().enumerate() {
            validate_definition(service)?;
            if index.insert(service.id.clone(), position).is_some() {
                return Err(AppError::Config(format!(
                    "duplicate service type id '{}'",
                    service.id
                )));
            }
            if !prefixes.insert(service.ticket_prefix.clone()) {
                return Err(AppError::Config(format!(
                    "duplicate ticket prefix '{}' (service type '{}')",
                    service.ticket_prefix, service.id
                )));
            }
        }

        Ok(Self { services, index })
    }

    /// Built-in catalog: general, express and VIP service
    pub fn builtin() -> Self {
        let services = builtin_service_types();
        let index = services
            .iter()
            .enumerate()
            .map(|(position, service)| (service.id.clone(), position))
            .collect();
        Self { services, index }
    }

    /// Look up a service type (active or not)
    pub fn get(&self, id: &str) -> Result<&ServiceTypeDef> {
        self.index
            .get(id)
            .map(|&position| &self.services[position])
            .ok_or_else(|| AppError::UnknownServiceType(id.to_string()))
    }

    /// Look up a service type that currently accepts tickets
    pub fn get_active(&self, id: &str) -> Result<&ServiceTypeDef> {
        let service = self.get(id)?;
        if !service.is_active {
            return Err(AppError::UnknownServiceType(id.to_string()));
        }
        Ok(service)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn list_active(&self) -> Vec<ServiceTypeDef> {
        self.services
            .iter()
            .filter(|service| service.is_active)
            .cloned()
            .collect()
    }

    /// All service types in configured order
    pub fn list_all(&self) -> &[ServiceTypeDef] {
        &self.services
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|service| service.id.as_str())
    }
}

fn validate_definition(service: &ServiceTypeDef) -> Result<()> {
    if service.id.trim().is_empty() {
        return Err(AppError::Config(
            "service type id must not be empty".to_string(),
        ));
    }
    if service.ticket_prefix.is_empty() {
        return Err(AppError::Config(format!(
            "ticket prefix of '{}' must not be empty",
            service.id
        )));
    }
    if !service
        .ticket_prefix
        .chars()
        .all(|c| c.is_ascii_alphabetic())
    {
        return Err(AppError::Config(format!(
            "ticket prefix '{}' of '{}' must contain ASCII letters only",
            service.ticket_prefix, service.id
        )));
    }
    if service.average_processing_time_minutes == 0 {
        return Err(AppError::Config(format!(
            "average processing time of '{}' must be > 0",
            service.id
        )));
    }
    Ok(())
}

pub(crate) fn builtin_service_types() -> Vec<ServiceTypeDef> {
    vec![
        ServiceTypeDef::new("general", "General Service", 10, 1, "A")
            .with_description("General inquiries and services"),
        ServiceTypeDef::new("express", "Express Service", 5, 2, "E")
            .with_description("Quick services under 5 minutes"),
        ServiceTypeDef::new("vip", "VIP Service", 15, 3, "V")
            .with_description("Priority services for VIP customers"),
    ]
}
