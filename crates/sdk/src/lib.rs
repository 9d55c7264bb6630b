//! Waitline Client SDK
//!
//! Typed JSON-RPC client for the Waitline queue service: join the queue,
//! advance service, read status, and stream live status updates over the
//! WebSocket subscription.

mod client;
mod error;
mod types;

pub use client::{StatusSubscription, WaitlineClient};
pub use error::SdkError;
pub use types::{JoinResult, QueueStatus, ServeResult};
