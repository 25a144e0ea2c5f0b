//! Shared fixtures for the QueueDesk integration tests

use queuedesk_api_rpc::{BroadcastEventSink, RpcServer, RpcServerConfig};
use queuedesk_core::application::CounterSpec;
use queuedesk_core::port::event_sink::mocks::RecordingEventSink;
use queuedesk_core::port::time_provider::mocks::FixedTimeProvider;
use queuedesk_core::{DispatchEngine, FloorLayout};
use std::net::SocketAddr;
use std::sync::Arc;

pub use jsonrpsee::server::ServerHandle;

/// Fixed business day used by every fixture: 2026-10-17 (`261017` in ticket numbers)
pub const TEST_DAY: (i32, u32, u32) = (2026, 10, 17);

pub fn clock() -> Arc<FixedTimeProvider> {
    let (y, m, d) = TEST_DAY;
    Arc::new(FixedTimeProvider::ymd(y, m, d))
}

pub fn counter(number: u32, service_types: &[&str]) -> CounterSpec {
    CounterSpec {
        number,
        name: format!("Counter {}", number),
        service_types: service_types.iter().map(|s| s.to_string()).collect(),
    }
}

/// Engine over the built-in service types with the given counters
pub fn engine_with(counters: Vec<CounterSpec>) -> (DispatchEngine, Arc<RecordingEventSink>) {
    let layout = FloorLayout {
        counters,
        ..FloorLayout::default()
    };
    let events = Arc::new(RecordingEventSink::new());
    let engine = DispatchEngine::from_layout(&layout, events.clone(), clock())
        .expect("test layout is valid");
    (engine, events)
}

/// Live RPC server on an ephemeral port over the default floor
pub async fn start_server() -> (SocketAddr, ServerHandle) {
    let events = Arc::new(BroadcastEventSink::default());
    let engine = DispatchEngine::from_layout(&FloorLayout::default(), events.clone(), clock())
        .expect("default layout is valid");
    let config = RpcServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    RpcServer::new(config, Arc::new(engine), events)
        .start()
        .await
        .expect("server starts on an ephemeral port")
}
