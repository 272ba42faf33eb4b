//! Error types for the log module.

use thiserror::Error;

/// Contract violations detected at construction time.
///
/// These refuse to start rather than run with undefined behavior; the
/// log has no runtime error channel at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A log must retain at least one message.
    #[error("message log capacity must be at least 1")]
    ZeroCapacity,
}
