// Join Use Case
//
// Atomically issues the next token: read-increment-write of
// `current_token` plus the WAITING ledger insert, as one indivisible unit
// relative to every other join/serve. The exclusive session lock is held
// from `session_for_update` until commit; any failure drops the
// transaction and rolls everything back, so no partial state (counter
// without record, or record without counter) can persist.

use crate::domain::TokenRecord;
use crate::error::Result;
use crate::port::{QueueTransaction, TimeProvider, Transaction, TransactionalQueueRepository};

/// Execute the join operation, returning the newly issued token number.
pub async fn execute(
    queue_repo: &dyn TransactionalQueueRepository,
    time_provider: &dyn TimeProvider,
) -> Result<i64> {
    let mut tx = queue_repo.begin_transaction().await?;

    let mut session = tx.session_for_update().await?;
    let new_token = session.issue_next();

    tx.update_session(&session).await?;
    tx.insert_token(&TokenRecord::waiting(new_token, time_provider.now_millis()))
        .await?;

    tx.commit().await?;

    Ok(new_token)
}
