//! JSON-RPC Server
//!
//! Serves the queue operations over HTTP and WebSocket on localhost and
//! fans queue snapshots out to WS subscribers. Snapshot delivery is
//! best-effort: each observer has its own forwarding loop, a slow
//! observer skips lagged snapshots, and a dead one just ends its loop.

use crate::handler::RpcHandler;
use jsonrpsee::core::SubscriptionResult;
use jsonrpsee::server::{PendingSubscriptionSink, Server, ServerHandle, SubscriptionMessage};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};
use waitline_core::application::QueueService;
use waitline_core::port::BroadcastNotifier;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9538;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
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
    notifier: Arc<BroadcastNotifier>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        queue: Arc<QueueService>,
        notifier: Arc<BroadcastNotifier>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(queue)),
            notifier,
        }
    }

    /// Start the JSON-RPC server.
    ///
    /// Security: only binds to 127.0.0.1 by default (no external access).
    /// Returns the bound address alongside the handle so callers binding
    /// port 0 can discover the real port.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to resolve bound address: {}", e))?;

        let mut module = RpcModule::new(());

        // Register methods
        let handler = self.handler.clone();
        module
            .register_async_method("queue.join.v1", move |_params, _, _| {
                let handler = handler.clone();
                async move { handler.join().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.serveNext.v1", move |_params, _, _| {
                let handler = handler.clone();
                async move { handler.serve_next().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.status.v1", move |_params, _, _| {
                let handler = handler.clone();
                async move { handler.status().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_method("system.health.v1", move |_params, _, _| {
                Ok::<_, jsonrpsee::types::ErrorObjectOwned>(handler.health())
            })
            .map_err(|e| e.to_string())?;

        // Status broadcast subscription
        let handler = self.handler.clone();
        let notifier = self.notifier.clone();
        module
            .register_subscription(
                "queue.subscribeStatus.v1",
                "queue.statusUpdate.v1",
                "queue.unsubscribeStatus.v1",
                move |_params, pending, _, _| {
                    let handler = handler.clone();
                    let notifier = notifier.clone();
                    async move { forward_snapshots(handler, notifier, pending).await }
                },
            )
            .map_err(|e| e.to_string())?;

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}

/// Per-observer forwarding loop.
///
/// Subscribes to the notifier before sending the connection-time snapshot
/// so no update published in between is lost; the observer may see the
/// same state twice but never out of order.
async fn forward_snapshots(
    handler: Arc<RpcHandler>,
    notifier: Arc<BroadcastNotifier>,
    pending: PendingSubscriptionSink,
) -> SubscriptionResult {
    let mut rx = notifier.subscribe();

    let sink = match pending.accept().await {
        Ok(sink) => sink,
        Err(_) => return Ok(()),
    };

    // Initial fetch at connection time; there is no replay of older state
    if let Ok(snapshot) = handler.status().await {
        let msg = SubscriptionMessage::from_json(&snapshot)
            .map_err(|e| format!("serialize snapshot: {}", e))?;
        if sink.send(msg).await.is_err() {
            return Ok(());
        }
    }

    loop {
        tokio::select! {
            _ = sink.closed() => {
                debug!("observer disconnected");
                break;
            }
            received = rx.recv() => match received {
                Ok(snapshot) => {
                    let msg = SubscriptionMessage::from_json(&snapshot)
                        .map_err(|e| format!("serialize snapshot: {}", e))?;
                    if sink.send(msg).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Best-effort delivery: drop old snapshots, keep order
                    debug!(skipped, "observer lagged behind snapshot stream");
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}
