//! RPC Response Types
//!
//! The three queue operations take no parameters; their results and the
//! subscription payload use the camelCase wire names of the original
//! public API. The status payload is `waitline_core::domain::QueueStatus`
//! serialized as-is.

use serde::{Deserialize, Serialize};

/// queue.join.v1 - token issued to the caller, authoritative immediately
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub token: i64,
}

/// queue.serveNext.v1 - token now being served
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeNextResponse {
    pub served: i64,
}

/// system.health.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
