// Serve-Next Use Case
//
// Serialized against join and other serve calls through the same
// exclusive session lock. Marks the token that was at the counter DONE
// (skipped when nothing has been served yet) and advances the pointer.
// Advancing with nobody waiting still increments; downstream status then
// shows now_serving ahead of last_issued. That gap is inherited behavior,
// pinned by the serve-on-empty integration test.

use crate::domain::ServeOutcome;
use crate::error::Result;
use crate::port::{QueueTransaction, Transaction, TransactionalQueueRepository};

/// Execute the serve operation, returning the previous and new serving
/// numbers.
pub async fn execute(queue_repo: &dyn TransactionalQueueRepository) -> Result<ServeOutcome> {
    let mut tx = queue_repo.begin_transaction().await?;

    let mut session = tx.session_for_update().await?;
    let outcome = session.advance();

    if outcome.previous > 0 {
        tx.mark_token_done(outcome.previous).await?;
    }
    tx.update_session(&session).await?;

    tx.commit().await?;

    Ok(outcome)
}
