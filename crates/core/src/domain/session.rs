// Queue Session Domain Model
//
// Singleton counter pair backing the whole queue: `current_token` is the
// highest token ever issued, `current_serving` the token at the counter.
// Both start at 0 and only ever grow. All mutation happens through
// `issue_next` / `advance` while the caller holds the store's exclusive
// session lock.

use serde::{Deserialize, Serialize};

/// Durable counters for a single queue (one row, id fixed to 1 in the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSession {
    pub current_token: i64,
    pub current_serving: i64,
}

/// Result of advancing the service pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeOutcome {
    /// Token that was at the counter before the advance (0 = none yet served)
    pub previous: i64,
    /// Token now being served
    pub now_serving: i64,
}

impl QueueSession {
    /// Fresh session with both counters at 0
    pub fn new() -> Self {
        Self {
            current_token: 0,
            current_serving: 0,
        }
    }

    /// Issue the next token: read-increment-write of `current_token`.
    ///
    /// Returns the newly issued token number (1-based, strictly increasing).
    pub fn issue_next(&mut self) -> i64 {
        self.current_token += 1;
        self.current_token
    }

    /// Advance the service pointer by one.
    ///
    /// The token previously at the counter (if any) is reported back so the
    /// caller can mark its ledger record DONE. Advancing past
    /// `current_token` is permitted and leaves `now_serving` ahead of the
    /// last issued token; see the serve-on-empty tests for the observable
    /// outcome.
    pub fn advance(&mut self) -> ServeOutcome {
        let previous = self.current_serving;
        self.current_serving += 1;
        ServeOutcome {
            previous,
            now_serving: self.current_serving,
        }
    }

    /// Number of issued tokens not yet reached by the service pointer
    pub fn outstanding(&self) -> i64 {
        (self.current_token - self.current_serving).max(0)
    }
}

impl Default for QueueSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_zero() {
        let session = QueueSession::new();
        assert_eq!(session.current_token, 0);
        assert_eq!(session.current_serving, 0);
        assert_eq!(session.outstanding(), 0);
    }

    #[test]
    fn test_issue_next_is_sequential() {
        let mut session = QueueSession::new();
        assert_eq!(session.issue_next(), 1);
        assert_eq!(session.issue_next(), 2);
        assert_eq!(session.issue_next(), 3);
        assert_eq!(session.current_token, 3);
    }

    #[test]
    fn test_advance_reports_previous_token() {
        let mut session = QueueSession {
            current_token: 5,
            current_serving: 2,
        };

        let outcome = session.advance();
        assert_eq!(outcome.previous, 2);
        assert_eq!(outcome.now_serving, 3);
        assert_eq!(session.current_serving, 3);
        assert_eq!(session.outstanding(), 2);
    }

    #[test]
    fn test_first_advance_has_no_previous() {
        let mut session = QueueSession {
            current_token: 1,
            current_serving: 0,
        };

        let outcome = session.advance();
        assert_eq!(outcome.previous, 0);
        assert_eq!(outcome.now_serving, 1);
    }

    #[test]
    fn test_advance_past_last_issued_is_not_guarded() {
        // Serving can run ahead of issuance; callers see waiting = 0
        let mut session = QueueSession::new();
        let outcome = session.advance();
        assert_eq!(outcome.now_serving, 1);
        assert!(session.current_serving > session.current_token);
        assert_eq!(session.outstanding(), 0);
    }
}
