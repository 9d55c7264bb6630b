// SQLite Queue Transaction Implementation

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction as SqlxTransaction};
use waitline_core::domain::{QueueSession, TokenNumber, TokenRecord, TokenStatus};
use waitline_core::error::{AppError, Result};
use waitline_core::port::{QueueTransaction, Transaction};

use crate::queue_repository::{map_sqlx_error, SessionRow};

pub struct SqliteQueueTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteQueueTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteQueueTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl QueueTransaction for SqliteQueueTransaction<'_> {
    async fn session_for_update(&mut self) -> Result<QueueSession> {
        // SQLite cannot lock a row with a bare SELECT. The self-assignment
        // write acquires the database write lock immediately and holds it
        // until commit/rollback, so every concurrent join/serve serializes
        // here - the SELECT ... FOR UPDATE equivalent. busy_timeout bounds
        // the wait; expiry surfaces as a retryable lock timeout.
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            UPDATE queue_session SET current_token = current_token
            WHERE id = 1
            RETURNING current_token, current_serving
            "#,
        )
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        row.map(SessionRow::into_session)
            .ok_or_else(|| AppError::InvalidState("queue_session row missing".to_string()))
    }

    async fn update_session(&mut self, session: &QueueSession) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE queue_session SET current_token = ?, current_serving = ?
            WHERE id = 1
            "#,
        )
        .bind(session.current_token)
        .bind(session.current_serving)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn insert_token(&mut self, record: &TokenRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO queue_tokens (token_number, status, issued_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(record.token_number)
        .bind(record.status.to_string())
        .bind(record.issued_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn mark_token_done(&mut self, token_number: TokenNumber) -> Result<()> {
        // Conditional update keeps the WAITING -> DONE transition
        // one-directional even if callers race outside the session lock
        let result = sqlx::query(
            r#"
            UPDATE queue_tokens SET status = ?
            WHERE token_number = ? AND status = ?
            "#,
        )
        .bind(TokenStatus::Done.to_string())
        .bind(token_number)
        .bind(TokenStatus::Waiting.to_string())
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            // Record missing or already DONE - distinguish for the caller
            let current: Option<String> =
                sqlx::query_scalar("SELECT status FROM queue_tokens WHERE token_number = ?")
                    .bind(token_number)
                    .fetch_optional(&mut *self.tx)
                    .await
                    .map_err(map_sqlx_error)?;

            match current {
                None => Err(AppError::NotFound(format!(
                    "Token {} not in ledger",
                    token_number
                ))),
                Some(status) => Err(AppError::InvalidState(format!(
                    "Cannot mark token {} done from {}",
                    token_number, status
                ))),
            }
        } else {
            Ok(())
        }
    }
}
