//! Unit tests for the queue service over an in-memory store.
//!
//! Concurrency properties are covered by the integration tests against
//! SQLite; these tests pin the engine's transition logic and the
//! post-commit broadcast.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::QueueService;
use crate::domain::{QueueSession, QueueStatus, TokenNumber, TokenRecord, TokenStatus};
use crate::error::{AppError, Result};
use crate::port::{
    QueueRepository, QueueTransaction, StatusNotifier, TimeProvider, Transaction,
    TransactionalQueueRepository,
};

#[derive(Debug, Clone, Default)]
struct StoreState {
    session: QueueSession,
    tokens: Vec<TokenRecord>,
}

#[derive(Default)]
struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

struct InMemoryTx {
    state: Arc<Mutex<StoreState>>,
    staged: StoreState,
}

#[async_trait]
impl Transaction for InMemoryTx {
    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTx { state, staged } = *self;
        *state.lock().unwrap() = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl QueueTransaction for InMemoryTx {
    async fn session_for_update(&mut self) -> Result<QueueSession> {
        Ok(self.staged.session.clone())
    }

    async fn update_session(&mut self, session: &QueueSession) -> Result<()> {
        self.staged.session = session.clone();
        Ok(())
    }

    async fn insert_token(&mut self, record: &TokenRecord) -> Result<()> {
        if self
            .staged
            .tokens
            .iter()
            .any(|t| t.token_number == record.token_number)
        {
            return Err(AppError::Conflict(format!(
                "token {} already issued",
                record.token_number
            )));
        }
        self.staged.tokens.push(record.clone());
        Ok(())
    }

    async fn mark_token_done(&mut self, token_number: TokenNumber) -> Result<()> {
        let record = self
            .staged
            .tokens
            .iter_mut()
            .find(|t| t.token_number == token_number)
            .ok_or_else(|| AppError::NotFound(format!("token {} not in ledger", token_number)))?;
        record.complete()?;
        Ok(())
    }
}

#[async_trait]
impl TransactionalQueueRepository for InMemoryStore {
    async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>> {
        let staged = self.state.lock().unwrap().clone();
        Ok(Box::new(InMemoryTx {
            state: Arc::clone(&self.state),
            staged,
        }))
    }
}

#[async_trait]
impl QueueRepository for InMemoryStore {
    async fn get_session(&self) -> Result<QueueSession> {
        Ok(self.state.lock().unwrap().session.clone())
    }

    async fn waiting_count(&self) -> Result<i64> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tokens
            .iter()
            .filter(|t| t.status == TokenStatus::Waiting)
            .count() as i64)
    }

    async fn find_token(&self, token_number: TokenNumber) -> Result<Option<TokenRecord>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tokens
            .iter()
            .find(|t| t.token_number == token_number)
            .cloned())
    }

    async fn tokens_by_status(&self, status: TokenStatus) -> Result<Vec<TokenRecord>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tokens
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect())
    }
}

struct FixedTimeProvider(i64);

impl TimeProvider for FixedTimeProvider {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[derive(Default)]
struct CollectingNotifier {
    snapshots: Mutex<Vec<QueueStatus>>,
}

impl StatusNotifier for CollectingNotifier {
    fn publish(&self, status: QueueStatus) {
        self.snapshots.lock().unwrap().push(status);
    }
}

fn setup() -> (QueueService, Arc<InMemoryStore>, Arc<CollectingNotifier>) {
    let store = Arc::new(InMemoryStore::default());
    let notifier = Arc::new(CollectingNotifier::default());
    let service = QueueService::new(
        store.clone(),
        store.clone(),
        notifier.clone(),
        Arc::new(FixedTimeProvider(1000)),
    );
    (service, store, notifier)
}

#[tokio::test]
async fn test_join_issues_sequential_tokens() {
    let (service, store, _) = setup();

    assert_eq!(service.join().await.unwrap(), 1);
    assert_eq!(service.join().await.unwrap(), 2);

    let state = store.state.lock().unwrap().clone();
    assert_eq!(state.session.current_token, 2);
    assert_eq!(state.tokens.len(), 2);
    assert_eq!(state.tokens[0], TokenRecord::waiting(1, 1000));
    assert_eq!(state.tokens[1].status, TokenStatus::Waiting);
}

#[tokio::test]
async fn test_serve_next_marks_previous_done() {
    let (service, store, _) = setup();

    // Session at {current_token: 5, current_serving: 2}
    {
        let mut state = store.state.lock().unwrap();
        state.session = QueueSession {
            current_token: 5,
            current_serving: 2,
        };
        state.tokens = (1..=5)
            .map(|n| {
                let mut record = TokenRecord::waiting(n, 1000);
                if n < 2 {
                    record.complete().unwrap();
                }
                record
            })
            .collect();
    }

    assert_eq!(service.serve_next().await.unwrap(), 3);

    let token2 = store.find_token(2).await.unwrap().unwrap();
    assert_eq!(token2.status, TokenStatus::Done);

    // Token 3 is at the counter and stays WAITING until passed
    let status = service.status().await.unwrap();
    assert_eq!(
        status,
        QueueStatus {
            now_serving: 3,
            last_issued: 5,
            waiting: 3
        }
    );
}

#[tokio::test]
async fn test_first_serve_skips_ledger_update() {
    let (service, store, _) = setup();
    service.join().await.unwrap();

    // current_serving is 0: nothing was at the counter, nothing to mark
    assert_eq!(service.serve_next().await.unwrap(), 1);

    let token1 = store.find_token(1).await.unwrap().unwrap();
    assert_eq!(token1.status, TokenStatus::Waiting);
}

#[tokio::test]
async fn test_status_on_fresh_queue_after_first_join() {
    let (service, _, _) = setup();

    assert_eq!(service.join().await.unwrap(), 1);

    let status = service.status().await.unwrap();
    assert_eq!(
        status,
        QueueStatus {
            now_serving: 0,
            last_issued: 1,
            waiting: 1
        }
    );
}

#[tokio::test]
async fn test_snapshot_published_after_every_mutation() {
    let (service, _, notifier) = setup();

    service.join().await.unwrap();
    service.join().await.unwrap();
    service.serve_next().await.unwrap();

    let snapshots = notifier.snapshots.lock().unwrap().clone();
    assert_eq!(snapshots.len(), 3);
    assert_eq!(
        snapshots[0],
        QueueStatus {
            now_serving: 0,
            last_issued: 1,
            waiting: 1
        }
    );
    assert_eq!(
        snapshots[2],
        QueueStatus {
            now_serving: 1,
            last_issued: 2,
            waiting: 2
        }
    );
}

#[tokio::test]
async fn test_serve_on_empty_queue_still_advances() {
    let (service, _, _) = setup();

    // Inherited behavior: the pointer runs ahead of issuance
    assert_eq!(service.serve_next().await.unwrap(), 1);

    let status = service.status().await.unwrap();
    assert_eq!(status.now_serving, 1);
    assert_eq!(status.last_issued, 0);
    assert_eq!(status.waiting, 0);
}
