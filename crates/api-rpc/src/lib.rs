//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 request surface for the Waitline queue
//! service: the three queue operations, a health probe, and the
//! status-broadcast subscription.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
