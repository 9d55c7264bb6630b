// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Lock timeout: {0}")]
    LockTimeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the caller may retry the operation.
    ///
    /// Store-unavailable and lock-timeout failures are transient: the
    /// transaction rolled back cleanly and a retry can succeed. Invariant
    /// violations and everything else are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::LockTimeout(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// From implementation for infra crates (to avoid circular dependency)
impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Database(err)
    }
}

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Database / AppError::LockTimeout

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(AppError::Database("connection refused".into()).is_retryable());
        assert!(AppError::LockTimeout("session row busy".into()).is_retryable());
        assert!(!AppError::InvalidState("serving ahead of ledger".into()).is_retryable());
        assert!(!AppError::Internal("bug".into()).is_retryable());
    }
}
