// Status Projection Use Case
//
// Stateless combination of the session row and the ledger's WAITING
// aggregate. Always computed outside the engine's transaction so the
// aggregate scan never runs under the exclusive session lock. Reads may
// be slightly stale; staleness is bounded by the next join/serve.

use crate::domain::QueueStatus;
use crate::error::Result;
use crate::port::QueueRepository;

/// Project the externally visible queue snapshot.
pub async fn execute(queue_repo: &dyn QueueRepository) -> Result<QueueStatus> {
    let session = queue_repo.get_session().await?;
    let waiting = queue_repo.waiting_count().await?;

    Ok(QueueStatus {
        now_serving: session.current_serving,
        last_issued: session.current_token,
        waiting,
    })
}
