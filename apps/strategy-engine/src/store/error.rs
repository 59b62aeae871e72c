//! Store error types.

use thiserror::Error;

/// Errors from the strategy store and its persistence collaborator.
///
/// Persistence failures are reported to the caller, never retried; the
/// in-memory state keeps its last value.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted collection could not be serialized or parsed.
    #[error("Strategy serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the backing storage failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The storage backend rejected the operation.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Backend-provided failure description.
        message: String,
    },

    /// A contract draft or update violated a domain invariant.
    #[error(transparent)]
    Contract(#[from] crate::domain::ContractError),
}
