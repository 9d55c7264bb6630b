// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid token state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Token not found: {0}")]
    TokenNotFound(i64),

    #[error("Unknown token status: {0}")]
    UnknownStatus(String),

    #[error("Inconsistent session state: {0}")]
    InconsistentSession(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
