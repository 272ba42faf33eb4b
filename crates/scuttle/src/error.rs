//! Error types for the Scuttle facade.

use thiserror::Error;

use scuttle_log::ConfigError;

/// Errors surfaced to the embedding application.
///
/// Everything the transport drives at runtime (decode failures, full
/// channels, rejected inserts) is handled locally and never reaches this
/// type; only startup-time contract violations do.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Channel buffer sizes must be at least 1.
    #[error("channel capacity must be at least 1")]
    ZeroChannelCapacity,

    /// A zero multiplier would retire broadcasts before they spread.
    #[error("retransmit multiplier must be at least 1")]
    ZeroRetransmitMult,
}

/// Result type for Scuttle operations.
pub type Result<T> = std::result::Result<T, ChatError>;
