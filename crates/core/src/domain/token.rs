// Token Ledger Domain Model

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};

/// Token number (unique, monotonically assigned, 1-based)
pub type TokenNumber = i64;

/// Token status. One-directional: WAITING -> DONE, transitioned exactly
/// once by the serve operation that advances past the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    Waiting,
    Done,
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStatus::Waiting => write!(f, "WAITING"),
            TokenStatus::Done => write!(f, "DONE"),
        }
    }
}

impl std::str::FromStr for TokenStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "WAITING" => Ok(TokenStatus::Waiting),
            "DONE" => Ok(TokenStatus::Done),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Ledger entry for one issued token. Never deleted or reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token_number: TokenNumber,
    pub status: TokenStatus,
    pub issued_at: i64, // epoch ms
}

impl TokenRecord {
    /// Fresh WAITING record, created by the join operation
    pub fn waiting(token_number: TokenNumber, issued_at: i64) -> Self {
        Self {
            token_number,
            status: TokenStatus::Waiting,
            issued_at,
        }
    }

    /// Transition to DONE. Rejects a second transition.
    pub fn complete(&mut self) -> Result<()> {
        if self.status != TokenStatus::Waiting {
            return Err(DomainError::InvalidStateTransition {
                from: self.status.to_string(),
                to: TokenStatus::Done.to_string(),
            });
        }
        self.status = TokenStatus::Done;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(TokenStatus::Waiting.to_string(), "WAITING");
        assert_eq!("DONE".parse::<TokenStatus>().unwrap(), TokenStatus::Done);
        assert!("PENDING".parse::<TokenStatus>().is_err());
    }

    #[test]
    fn test_complete_transitions_once() {
        let mut record = TokenRecord::waiting(7, 1000);
        assert_eq!(record.status, TokenStatus::Waiting);

        record.complete().unwrap();
        assert_eq!(record.status, TokenStatus::Done);

        let err = record.complete().unwrap_err();
        assert!(err.to_string().contains("DONE"));
    }
}
