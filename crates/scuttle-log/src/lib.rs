//! # Scuttle Log
//!
//! The per-node replica of chat history: a bounded, deduplicated,
//! time-ordered collection of messages with an eviction policy.
//!
//! ## Key Properties
//!
//! - **Idempotent**: re-inserting a known identity is a silent no-op
//! - **First-write-wins**: the fields recorded at first insertion are
//!   never overwritten by a later copy of the same identity
//! - **Bounded**: at most `capacity` distinct identities are retained;
//!   overflow evicts the oldest entries by local clock
//! - **Thread-safe**: all operations take `&self` and serialize through
//!   one internal lock
//!
//! Rejections (duplicates, entries older than the retained window) are
//! routine outcomes of the dedup/eviction policy, not errors. [`put`]
//! reports them as [`PutOutcome`] variants so callers and tests can
//! observe them directly.
//!
//! [`put`]: MessageLog::put

pub mod error;
pub mod log;

pub use error::ConfigError;
pub use log::{MergeStats, MessageLog, PutOutcome};
