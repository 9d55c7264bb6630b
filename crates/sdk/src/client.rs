//! Waitline Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{JoinResult, QueueStatus, ServeResult};
use jsonrpsee::core::client::{ClientT, Subscription, SubscriptionClientT};
use jsonrpsee::rpc_params;
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use std::time::Duration;

/// Waitline queue client
///
/// High-level interface to a Waitline daemon over WebSocket. The same
/// connection carries the three queue operations and the live status
/// subscription.
///
/// # Example
///
/// ```no_run
/// use waitline_sdk::WaitlineClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WaitlineClient::connect("ws://127.0.0.1:9538").await?;
/// let join = client.join().await?;
/// println!("your token: {}", join.token);
/// # Ok(())
/// # }
/// ```
pub struct WaitlineClient {
    client: WsClient,
}

impl WaitlineClient {
    /// Connect to a Waitline daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `ws://127.0.0.1:9538`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = WsClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .await
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Join the queue. The returned token is authoritative immediately.
    pub async fn join(&self) -> Result<JoinResult> {
        let result: JoinResult = self.client.request("queue.join.v1", rpc_params![]).await?;
        Ok(result)
    }

    /// Advance the service pointer to the next token.
    pub async fn serve_next(&self) -> Result<ServeResult> {
        let result: ServeResult = self
            .client
            .request("queue.serveNext.v1", rpc_params![])
            .await?;
        Ok(result)
    }

    /// Fetch the current queue snapshot.
    pub async fn status(&self) -> Result<QueueStatus> {
        let result: QueueStatus = self
            .client
            .request("queue.status.v1", rpc_params![])
            .await?;
        Ok(result)
    }

    /// Subscribe to live queue snapshots.
    ///
    /// The first message is the snapshot at connection time; afterwards
    /// every queue change produces one message, in order. There is no
    /// replay of state from before the subscription.
    pub async fn subscribe_status(&self) -> Result<StatusSubscription> {
        let inner = self
            .client
            .subscribe(
                "queue.subscribeStatus.v1",
                rpc_params![],
                "queue.unsubscribeStatus.v1",
            )
            .await?;

        Ok(StatusSubscription { inner })
    }
}

/// Live status stream
pub struct StatusSubscription {
    inner: Subscription<QueueStatus>,
}

impl StatusSubscription {
    /// Next snapshot; `SubscriptionClosed` once the server hangs up.
    pub async fn next(&mut self) -> Result<QueueStatus> {
        match self.inner.next().await {
            Some(Ok(status)) => Ok(status),
            Some(Err(e)) => Err(SdkError::Serialization(e)),
            None => Err(SdkError::SubscriptionClosed),
        }
    }
}
