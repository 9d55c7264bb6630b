// Queue Status Projection
//
// Derived snapshot, recomputed on demand from the session row and the
// ledger aggregate. Never persisted, never cached past one request or
// notification cycle. Wire names are camelCase to match the public
// payload shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    pub now_serving: i64,
    pub last_issued: i64,
    pub waiting: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let status = QueueStatus {
            now_serving: 3,
            last_issued: 5,
            waiting: 2,
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"nowServing": 3, "lastIssued": 5, "waiting": 2})
        );
    }
}
