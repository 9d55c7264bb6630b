//! RPC Error Types
//!
//! Every engine failure collapses to a generic failed-operation error on
//! the wire. The only signal a caller gets is whether a retry can help;
//! internal detail stays in the server log.

use jsonrpsee::types::ErrorObjectOwned;
use waitline_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const OPERATION_FAILED: i32 = 5000;
    pub const OPERATION_FAILED_RETRYABLE: i32 = 5001;
}

/// Convert AppError to a generic JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    if err.is_retryable() {
        tracing::warn!(error = %err, "queue operation failed (retryable)");
        ErrorObjectOwned::owned(
            code::OPERATION_FAILED_RETRYABLE,
            "queue operation failed, retry later",
            None::<()>,
        )
    } else {
        tracing::error!(error = %err, "queue operation failed");
        ErrorObjectOwned::owned(code::OPERATION_FAILED, "queue operation failed", None::<()>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_and_fatal_map_to_distinct_codes() {
        let retryable = to_rpc_error(AppError::LockTimeout("busy".into()));
        assert_eq!(retryable.code(), code::OPERATION_FAILED_RETRYABLE);

        let fatal = to_rpc_error(AppError::InvalidState("bad".into()));
        assert_eq!(fatal.code(), code::OPERATION_FAILED);
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = to_rpc_error(AppError::Database("password for db at 10.0.0.1".into()));
        assert!(!err.message().contains("10.0.0.1"));
        assert_eq!(err.message(), "queue operation failed, retry later");
    }
}
