//! SDK Wire Types
//!
//! Mirrors of the server's response payloads. The SDK deliberately does
//! not depend on the core crate; the wire contract is the boundary.

use serde::{Deserialize, Serialize};

/// Result of queue.join.v1. The token is authoritative immediately;
/// there is no confirmation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResult {
    pub token: i64,
}

/// Result of queue.serveNext.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeResult {
    pub served: i64,
}

/// Queue snapshot, also the subscription payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    pub now_serving: i64,
    pub last_issued: i64,
    pub waiting: i64,
}
