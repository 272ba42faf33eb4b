//! Error types for Scuttle Core.

use thiserror::Error;

/// A wire payload could not be decoded.
///
/// Decode failures are always local and non-fatal: callers log and drop
/// the offending unit of work. Existing log state is never affected.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
