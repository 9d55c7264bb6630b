// SQLite Queue Store Implementation

use crate::SqliteQueueTransaction;
use async_trait::async_trait;
use sqlx::SqlitePool;
use waitline_core::domain::{QueueSession, TokenNumber, TokenRecord, TokenStatus};
use waitline_core::error::{AppError, Result};
use waitline_core::port::{
    QueueRepository, QueueTransaction, TransactionalQueueRepository,
};

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => {
                        // UNIQUE constraint failed - two writers raced on
                        // the same token number; must not happen under the
                        // session lock
                        AppError::Conflict(format!(
                            "Unique constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "5" | "517" => {
                        // SQLITE_BUSY / SQLITE_BUSY_SNAPSHOT - the session
                        // lock was not granted within busy_timeout
                        AppError::LockTimeout(format!(
                            "Session lock not acquired within bound: {}",
                            db_err.message()
                        ))
                    }
                    "13" => {
                        // SQLITE_FULL - database or disk is full
                        AppError::Database(format!("Database full: {}", db_err.message()))
                    }
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        sqlx::Error::PoolTimedOut => {
            AppError::LockTimeout("Connection pool exhausted".to_string())
        }
        _ => {
            // Connection, protocol errors
            AppError::Database(err.to_string())
        }
    }
}

pub struct SqliteQueueRepository {
    pool: SqlitePool,
}

impl SqliteQueueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for SqliteQueueRepository {
    async fn get_session(&self) -> Result<QueueSession> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT current_token, current_serving FROM queue_session WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(SessionRow::into_session)
            .ok_or_else(|| AppError::InvalidState("queue_session row missing".to_string()))
    }

    async fn waiting_count(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM queue_tokens WHERE status = 'WAITING'")
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn find_token(&self, token_number: TokenNumber) -> Result<Option<TokenRecord>> {
        let row = sqlx::query_as::<_, TokenRow>(
            "SELECT token_number, status, issued_at FROM queue_tokens WHERE token_number = ?",
        )
        .bind(token_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(TokenRow::into_record).transpose()
    }

    async fn tokens_by_status(&self, status: TokenStatus) -> Result<Vec<TokenRecord>> {
        let rows: Vec<TokenRow> = sqlx::query_as(
            r#"
            SELECT token_number, status, issued_at FROM queue_tokens
            WHERE status = ?
            ORDER BY token_number ASC
            "#,
        )
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(TokenRow::into_record).collect()
    }
}

#[async_trait]
impl TransactionalQueueRepository for SqliteQueueRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteQueueTransaction::new(tx)))
    }
}

/// SQLite row representation of the session counters
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SessionRow {
    pub(crate) current_token: i64,
    pub(crate) current_serving: i64,
}

impl SessionRow {
    pub(crate) fn into_session(self) -> QueueSession {
        QueueSession {
            current_token: self.current_token,
            current_serving: self.current_serving,
        }
    }
}

/// SQLite row representation of a ledger entry
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TokenRow {
    token_number: i64,
    status: String,
    issued_at: i64,
}

impl TokenRow {
    pub(crate) fn into_record(self) -> Result<TokenRecord> {
        let status: TokenStatus = self.status.parse()?;
        Ok(TokenRecord {
            token_number: self.token_number,
            status,
            issued_at: self.issued_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use waitline_core::port::Transaction;

    async fn setup_test_db() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_get_session_reads_seeded_row() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);

        let session = repo.get_session().await.unwrap();
        assert_eq!(session, QueueSession::new());
    }

    #[tokio::test]
    async fn test_join_transaction_flow() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);

        let mut tx = repo.begin_transaction().await.unwrap();
        let mut session = tx.session_for_update().await.unwrap();
        let token = session.issue_next();
        tx.update_session(&session).await.unwrap();
        tx.insert_token(&TokenRecord::waiting(token, 1000))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(token, 1);
        assert_eq!(repo.get_session().await.unwrap().current_token, 1);
        assert_eq!(repo.waiting_count().await.unwrap(), 1);

        let record = repo.find_token(1).await.unwrap().unwrap();
        assert_eq!(record, TokenRecord::waiting(1, 1000));
    }

    #[tokio::test]
    async fn test_rollback_leaves_no_partial_state() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);

        let mut tx = repo.begin_transaction().await.unwrap();
        let mut session = tx.session_for_update().await.unwrap();
        let token = session.issue_next();
        tx.update_session(&session).await.unwrap();
        tx.insert_token(&TokenRecord::waiting(token, 1000))
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(repo.get_session().await.unwrap().current_token, 0);
        assert_eq!(repo.waiting_count().await.unwrap(), 0);
        assert!(repo.find_token(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_token_done_is_one_directional() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);

        let mut tx = repo.begin_transaction().await.unwrap();
        let mut session = tx.session_for_update().await.unwrap();
        let token = session.issue_next();
        tx.update_session(&session).await.unwrap();
        tx.insert_token(&TokenRecord::waiting(token, 1000))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let mut tx = repo.begin_transaction().await.unwrap();
        tx.mark_token_done(token).await.unwrap();
        tx.commit().await.unwrap();

        let record = repo.find_token(token).await.unwrap().unwrap();
        assert_eq!(record.status, TokenStatus::Done);

        // Second transition is rejected by the conditional update
        let mut tx = repo.begin_transaction().await.unwrap();
        let err = tx.mark_token_done(token).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_tokens_by_status_in_issue_order() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);

        for n in 1..=3 {
            let mut tx = repo.begin_transaction().await.unwrap();
            let mut session = tx.session_for_update().await.unwrap();
            let token = session.issue_next();
            tx.update_session(&session).await.unwrap();
            tx.insert_token(&TokenRecord::waiting(token, 1000 * n))
                .await
                .unwrap();
            tx.commit().await.unwrap();
        }

        let waiting = repo.tokens_by_status(TokenStatus::Waiting).await.unwrap();
        let numbers: Vec<i64> = waiting.iter().map(|t| t.token_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(repo
            .tokens_by_status(TokenStatus::Done)
            .await
            .unwrap()
            .is_empty());
    }
}
