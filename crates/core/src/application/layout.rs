// Floor Layout - static configuration of services and counters

use super::catalog::{builtin_service_types, ServiceCatalog};
use super::counter_registry::CounterRegistry;
use crate::domain::{Counter, CounterNumber, ServiceTypeDef, ServiceTypeId};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Counter as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub number: CounterNumber,
    pub name: String,
    /// Selection precedence: earlier entries are drained first
    pub service_types: Vec<ServiceTypeId>,
}

impl From<&CounterSpec> for Counter {
    fn from(spec: &CounterSpec) -> Self {
        Counter::new(spec.number, spec.name.clone(), spec.service_types.iter().cloned())
    }
}

/// Services and counters loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorLayout {
    #[serde(default = "builtin_service_types")]
    pub service_types: Vec<ServiceTypeDef>,
    #[serde(default = "builtin_counters")]
    pub counters: Vec<CounterSpec>,
}

impl Default for FloorLayout {
    /// Five general/express counters plus one VIP counter
    fn default() -> Self {
        Self {
            service_types: builtin_service_types(),
            counters: builtin_counters(),
        }
    }
}

impl FloorLayout {
    /// Validate and build the catalog and counter registry
    pub fn build(&self) -> Result<(ServiceCatalog, CounterRegistry)> {
        let catalog = ServiceCatalog::new(self.service_types.clone())?;
        let counters = self.counters.iter().map(Counter::from).collect();
        let registry = CounterRegistry::new(counters, &catalog)?;
        Ok((catalog, registry))
    }
}

fn builtin_counters() -> Vec<CounterSpec> {
    let mut counters: Vec<CounterSpec> = (1..=5)
        .map(|number| CounterSpec {
            number,
            name: format!("Counter {}", number),
            service_types: vec!["general".to_string(), "express".to_string()],
        })
        .collect();
    counters.push(CounterSpec {
        number: 6,
        name: "VIP Counter".to_string(),
        service_types: vec!["vip".to_string()],
    });
    counters
}
