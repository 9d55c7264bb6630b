// Queue Service - Core use cases for token issuance and service advancement

pub mod join;
pub mod serve;
pub mod status;

#[cfg(test)]
mod service_test;

use std::sync::Arc;

use crate::domain::QueueStatus;
use crate::error::Result;
use crate::port::{QueueRepository, StatusNotifier, TimeProvider, TransactionalQueueRepository};

/// Queue Service
///
/// Owns the transaction boundary for the two mutating operations and the
/// post-commit snapshot broadcast. Holds no queue state of its own; the
/// stores are the single source of truth.
pub struct QueueService {
    tx_repo: Arc<dyn TransactionalQueueRepository>,
    read_repo: Arc<dyn QueueRepository>,
    notifier: Arc<dyn StatusNotifier>,
    time_provider: Arc<dyn TimeProvider>,
}

impl QueueService {
    pub fn new(
        tx_repo: Arc<dyn TransactionalQueueRepository>,
        read_repo: Arc<dyn QueueRepository>,
        notifier: Arc<dyn StatusNotifier>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            tx_repo,
            read_repo,
            notifier,
            time_provider,
        }
    }

    /// Issue the next token and broadcast the new snapshot
    pub async fn join(&self) -> Result<i64> {
        let token = join::execute(self.tx_repo.as_ref(), self.time_provider.as_ref()).await?;
        tracing::info!(token, "token issued");

        self.publish_snapshot().await;
        Ok(token)
    }

    /// Advance the service pointer and broadcast the new snapshot
    pub async fn serve_next(&self) -> Result<i64> {
        let outcome = serve::execute(self.tx_repo.as_ref()).await?;
        tracing::info!(
            now_serving = outcome.now_serving,
            completed = outcome.previous,
            "service advanced"
        );

        self.publish_snapshot().await;
        Ok(outcome.now_serving)
    }

    /// Current queue snapshot (pure read, no locking)
    pub async fn status(&self) -> Result<QueueStatus> {
        status::execute(self.read_repo.as_ref()).await
    }

    /// Recompute the snapshot after a commit and hand it to the notifier.
    ///
    /// Runs outside the transaction so the aggregate scan never holds the
    /// session lock. Failures here never fail the originating operation.
    async fn publish_snapshot(&self) {
        match status::execute(self.read_repo.as_ref()).await {
            Ok(snapshot) => self.notifier.publish(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "failed to project queue status for broadcast");
            }
        }
    }
}
