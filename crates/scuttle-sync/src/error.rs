//! Error types for the sync module.

use thiserror::Error;

use scuttle_core::DecodeError;

/// Errors that can occur during reconciliation.
///
/// These are always local and non-fatal: the caller logs the failure and
/// drops the offending payload. The log is never left half-merged.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The peer's snapshot payload could not be decoded.
    #[error("malformed snapshot: {0}")]
    Decode(#[from] DecodeError),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
