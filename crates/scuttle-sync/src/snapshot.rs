//! Snapshot encode/merge: the anti-entropy reconciliation codec.
//!
//! A snapshot is one node's full ordered log contents at encode time,
//! used only as an ephemeral transport payload for the pairwise
//! state-exchange step. Timestamps are not part of the payload; the
//! receiving node stamps each previously-unseen message with its own
//! clock on merge.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scuttle_core::{DecodeError, Message, WireMessage};
use scuttle_log::{MergeStats, MessageLog};

use crate::error::Result;

/// Wire form of a full-state exchange: the ordered message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Messages in the sender's retained order, oldest first.
    pub messages: Vec<WireMessage>,
}

impl Snapshot {
    /// Decode a snapshot payload received from a peer.
    pub fn decode(raw: &[u8]) -> std::result::Result<Self, DecodeError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Encode for transport.
    ///
    /// The snapshot is always well-formed in-memory state, so a
    /// serialization failure is a contract violation rather than a
    /// recoverable runtime error.
    pub fn encode(&self) -> Bytes {
        Bytes::from(serde_json::to_vec(self).expect("in-memory snapshot is always serializable"))
    }
}

/// Serialize the full contents of `log` for a peer exchange.
pub fn encode_log(log: &MessageLog) -> Bytes {
    let snapshot = Snapshot {
        messages: log.snapshot().iter().map(Message::to_wire).collect(),
    };
    snapshot.encode()
}

/// Merge a peer's snapshot into the local log.
///
/// Decodes first: on malformed input the log is left untouched and the
/// error is returned for the caller to log. On success every message is
/// applied in snapshot order under a single lock acquisition, through the
/// log's normal dedup/eviction rules, so the merge is idempotent and (up
/// to the capacity cutoff) commutative.
pub fn merge_log(log: &MessageLog, raw: &[u8]) -> Result<MergeStats> {
    let snapshot = Snapshot::decode(raw)?;
    let stats = log.extend(snapshot.messages.into_iter().map(Message::from_wire));
    debug!(
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        rejected = stats.rejected,
        "merged remote snapshot"
    );
    Ok(stats)
}
