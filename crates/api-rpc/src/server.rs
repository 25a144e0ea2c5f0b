//! JSON-RPC Server
//!
//! Serves HTTP requests and WebSocket subscriptions on one TCP port.

use crate::events::BroadcastEventSink;
use crate::handler::RpcHandler;
use crate::types::{
    CallNextRequest, CreateTicketRequest, SetCounterStatusRequest, SubscribeRequest,
    TicketRequest,
};
use jsonrpsee::server::{PendingSubscriptionSink, Server, ServerHandle, SubscriptionMessage};
use jsonrpsee::types::{ErrorObjectOwned, Params};
use jsonrpsee::RpcModule;
use queuedesk_core::DispatchEngine;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9630;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 binds an ephemeral port (see the address returned by `start`)
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        engine: Arc<DispatchEngine>,
        events: Arc<BroadcastEventSink>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(engine, events)),
        }
    }

    /// Start the JSON-RPC server, returning the bound address and its handle
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server (HTTP + WebSocket)"
        );

        // Browser-based ticket displays call in from other origins
        let middleware = tower::ServiceBuilder::new().layer(CorsLayer::permissive());

        let server = Server::builder()
            .set_http_middleware(middleware)
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = build_module(self.handler).map_err(|e| e.to_string())?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}

fn build_module(handler: Arc<RpcHandler>) -> Result<RpcModule<()>, jsonrpsee::core::RegisterMethodError> {
    let mut module = RpcModule::new(());

    // Tickets
    register(&mut module, &handler, "ticket.create.v1", |h, req: CreateTicketRequest| async move {
        h.create_ticket(req).await
    })?;
    register(&mut module, &handler, "ticket.begin.v1", |h, req: TicketRequest| async move {
        h.begin_service(req).await
    })?;
    register(&mut module, &handler, "ticket.complete.v1", |h, req: TicketRequest| async move {
        h.complete(req).await
    })?;
    register(&mut module, &handler, "ticket.no_show.v1", |h, req: TicketRequest| async move {
        h.no_show(req).await
    })?;
    register(&mut module, &handler, "ticket.cancel.v1", |h, req: TicketRequest| async move {
        h.cancel(req).await
    })?;
    register(&mut module, &handler, "ticket.get.v1", |h, req: TicketRequest| async move {
        h.get_ticket(req).await
    })?;

    // Counters
    register(&mut module, &handler, "counter.call_next.v1", |h, req: CallNextRequest| async move {
        h.call_next(req).await
    })?;
    register(
        &mut module,
        &handler,
        "counter.set_status.v1",
        |h, req: SetCounterStatusRequest| async move { h.set_counter_status(req).await },
    )?;

    // Parameterless queries
    let h = handler.clone();
    module.register_async_method("ticket.waiting.v1", move |_, _, _| {
        let h = h.clone();
        async move { h.waiting().await }
    })?;
    let h = handler.clone();
    module.register_async_method("counter.list.v1", move |_, _, _| {
        let h = h.clone();
        async move { h.counters().await }
    })?;
    let h = handler.clone();
    module.register_async_method("service.list.v1", move |_, _, _| {
        let h = h.clone();
        async move { h.service_types().await }
    })?;
    let h = handler.clone();
    module.register_async_method("admin.stats.v1", move |_, _, _| {
        let h = h.clone();
        async move { h.stats().await }
    })?;

    // Live events
    let h = handler.clone();
    module.register_subscription(
        "queue.subscribe.v1",
        "queue.event",
        "queue.unsubscribe.v1",
        move |params, pending, _, _| {
            let h = h.clone();
            async move { stream_events(h, params, pending).await }
        },
    )?;

    Ok(module)
}

/// Register a method whose params deserialize into `Req`
fn register<Req, Resp, F, Fut>(
    module: &mut RpcModule<()>,
    handler: &Arc<RpcHandler>,
    method: &'static str,
    call: F,
) -> Result<(), jsonrpsee::core::RegisterMethodError>
where
    Req: DeserializeOwned + Send + 'static,
    Resp: serde::Serialize + Clone + Send + 'static,
    F: Fn(Arc<RpcHandler>, Req) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Resp, ErrorObjectOwned>> + Send + 'static,
{
    let handler = handler.clone();
    module.register_async_method(method, move |params, _, _| {
        let handler = handler.clone();
        let call = call.clone();
        async move {
            let req: Req = params.parse()?;
            call(handler, req).await
        }
    })?;
    Ok(())
}

/// Forward broadcast events to one subscriber until it unsubscribes
async fn stream_events(
    handler: Arc<RpcHandler>,
    params: Params<'static>,
    pending: PendingSubscriptionSink,
) -> jsonrpsee::core::SubscriptionResult {
    let filter = match params.parse::<Option<SubscribeRequest>>() {
        Ok(filter) => filter.unwrap_or_default(),
        Err(err) => {
            pending.reject(err).await;
            return Ok(());
        }
    };

    // Subscribe before accepting so no event between the two is missed
    let mut receiver = handler.events().subscribe();
    let sink = pending.accept().await?;
    info!(
        subscription = ?sink.subscription_id(),
        service_types = ?filter.service_types,
        "Queue subscriber attached"
    );

    loop {
        tokio::select! {
            _ = sink.closed() => break,
            received = receiver.recv() => match received {
                Ok(event) => {
                    if !event.concerns_any(&filter.service_types) {
                        continue;
                    }
                    let message = SubscriptionMessage::from_json(&event)?;
                    if sink.send(message).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Queue subscriber lagging, events skipped");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    debug!(subscription = ?sink.subscription_id(), "Queue subscriber detached");
    Ok(())
}
