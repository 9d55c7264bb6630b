// Queue Repository Port (read side)

use crate::domain::{QueueSession, TokenNumber, TokenRecord, TokenStatus};
use crate::error::Result;
use async_trait::async_trait;

/// Read-only access to the session row and token ledger.
///
/// Reads run outside the engine's write transaction and may observe
/// slightly stale state; staleness is bounded by the next join/serve.
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Current session counters
    async fn get_session(&self) -> Result<QueueSession>;

    /// Number of ledger records still WAITING
    async fn waiting_count(&self) -> Result<i64>;

    /// Look up a single ledger record
    async fn find_token(&self, token_number: TokenNumber) -> Result<Option<TokenRecord>>;

    /// All ledger records with the given status, in issue order
    async fn tokens_by_status(&self, status: TokenStatus) -> Result<Vec<TokenRecord>>;
}
