//! # Scuttle Sync
//!
//! Reconciliation and broadcast plumbing for the Scuttle chat log.
//!
//! ## Overview
//!
//! Gossip alone is lossy: broadcasts ride a transmission-limited queue
//! and can be dropped before every peer has seen them. This crate
//! provides the two repair mechanisms layered on top:
//!
//! - **Anti-entropy snapshots** ([`snapshot`]): the periodic pairwise
//!   full-state exchange. One node encodes its entire ordered log; the
//!   peer merges it through the log's normal dedup/eviction rules.
//! - **Broadcast invalidation** ([`broadcast`]): when the same logical
//!   message is queued for broadcast twice (redundant gossip paths), the
//!   newer enqueue prunes the stale pending copy instead of wasting
//!   transmissions on it.
//!
//! ## Key Properties
//!
//! - **Idempotent**: merging the same snapshot twice is a no-op
//! - **Commutative** at the level of final contents, up to the
//!   capacity/eviction cutoff (best-effort beyond the boundary)
//! - **Fail-soft**: a malformed snapshot or broadcast payload is logged
//!   and dropped; it never corrupts local state or blocks valid traffic

pub mod broadcast;
pub mod error;
pub mod queue;
pub mod snapshot;

pub use broadcast::{Broadcast, MessageBroadcast};
pub use error::{Result, SyncError};
pub use queue::{retransmit_limit, TransmitQueue};
pub use snapshot::{encode_log, merge_log, Snapshot};
