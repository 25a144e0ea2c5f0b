//! QueueDesk - Main Entry Point
//! Dispatch engine behind a JSON-RPC server with live queue events

mod settings;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use settings::DaemonConfig;
use queuedesk_api_rpc::{BroadcastEventSink, RpcServer};
use queuedesk_core::port::SystemTimeProvider;
use queuedesk_core::DispatchEngine;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    init_logging()?;

    info!("QueueDesk v{} starting...", VERSION);

    // 2. Load configuration
    let config = DaemonConfig::load()?;
    info!(
        rpc_host = %config.rpc_host,
        rpc_port = config.rpc_port,
        event_buffer = config.event_buffer,
        counters = config.layout.counters.len(),
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let events = Arc::new(BroadcastEventSink::new(config.event_buffer));
    let engine = DispatchEngine::from_layout(
        &config.layout,
        events.clone(),
        Arc::new(SystemTimeProvider),
    )
    .context("Invalid floor layout")?;

    // 4. Start JSON-RPC server
    let rpc_server = RpcServer::new(config.rpc(), Arc::new(engine), events);
    let (addr, rpc_handle) = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Waiting for customers...");
    info!("Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}

/// `QUEUEDESK_LOG_FORMAT=json` for structured logs, pretty otherwise
fn init_logging() -> Result<()> {
    let log_format =
        std::env::var("QUEUEDESK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("queuedesk=info"))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
    Ok(())
}
