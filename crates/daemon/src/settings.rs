//! Daemon settings
//!
//! Layered with the `config` crate: built-in defaults, then the optional file
//! named by `QUEUEDESK_CONFIG`, then `QUEUEDESK_*` environment variables.

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use queuedesk_api_rpc::events::DEFAULT_EVENT_BUFFER;
use queuedesk_api_rpc::server::{DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
use queuedesk_api_rpc::RpcServerConfig;
use queuedesk_core::FloorLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_ENV: &str = "QUEUEDESK_CONFIG";
const ENV_PREFIX: &str = "QUEUEDESK";

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub rpc_host: String,
    pub rpc_port: u16,
    /// Capacity of the event broadcast channel per subscriber
    pub event_buffer: usize,
    /// Services and counters; the built-in floor when absent
    #[serde(default)]
    pub layout: FloorLayout,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        let file = std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from);
        Self::load_from(file.as_deref(), environment())
    }

    pub fn load_from(file: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("rpc_host", DEFAULT_RPC_HOST)?
            .set_default("rpc_port", i64::from(DEFAULT_RPC_PORT))?
            .set_default("event_buffer", DEFAULT_EVENT_BUFFER as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn rpc(&self) -> RpcServerConfig {
        RpcServerConfig {
            host: self.rpc_host.clone(),
            port: self.rpc_port,
        }
    }
}

/// `QUEUEDESK_RPC_PORT` -> `rpc_port`; `__` separates nested keys
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
