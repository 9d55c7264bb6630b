// Transaction port for serialized queue mutations

use crate::domain::{QueueSession, TokenNumber, TokenRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Entry point for serialized queue mutations
#[async_trait]
pub trait TransactionalQueueRepository: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>>;
}

/// Mutations available inside a queue transaction.
///
/// `session_for_update` must acquire the store's exclusive lock on the
/// session row (SELECT ... FOR UPDATE equivalent) and hold it until
/// commit or rollback, so that every concurrent join/serve serializes
/// behind it - including callers in other process instances sharing the
/// same store. If the lock is not granted within the store's bounded
/// wait, the call fails with a retryable error instead of hanging.
#[async_trait]
pub trait QueueTransaction: Transaction {
    /// Read the session row under the exclusive lock
    async fn session_for_update(&mut self) -> Result<QueueSession>;

    /// Write both counters back to the session row
    async fn update_session(&mut self, session: &QueueSession) -> Result<()>;

    /// Append a ledger record (within transaction)
    async fn insert_token(&mut self, record: &TokenRecord) -> Result<()>;

    /// Mark a WAITING ledger record DONE (within transaction)
    async fn mark_token_done(&mut self, token_number: TokenNumber) -> Result<()>;
}
