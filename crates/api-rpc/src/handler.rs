//! RPC Method Handlers
//!
//! Thin adapters from JSON-RPC methods to the queue service. All failure
//! detail is translated to the generic failed-operation error here.

use crate::error::to_rpc_error;
use crate::types::{HealthResponse, JoinResponse, ServeNextResponse};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use waitline_core::application::QueueService;
use waitline_core::domain::QueueStatus;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    queue: Arc<QueueService>,
}

impl RpcHandler {
    pub fn new(queue: Arc<QueueService>) -> Self {
        Self { queue }
    }

    /// queue.join.v1
    pub async fn join(&self) -> Result<JoinResponse, ErrorObjectOwned> {
        let token = self.queue.join().await.map_err(to_rpc_error)?;
        Ok(JoinResponse { token })
    }

    /// queue.serveNext.v1
    pub async fn serve_next(&self) -> Result<ServeNextResponse, ErrorObjectOwned> {
        let served = self.queue.serve_next().await.map_err(to_rpc_error)?;
        Ok(ServeNextResponse { served })
    }

    /// queue.status.v1
    pub async fn status(&self) -> Result<QueueStatus, ErrorObjectOwned> {
        self.queue.status().await.map_err(to_rpc_error)
    }

    /// system.health.v1
    pub fn health(&self) -> HealthResponse {
        HealthResponse::ok()
    }
}
