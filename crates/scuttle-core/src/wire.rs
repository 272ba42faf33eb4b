//! Single-message wire format.
//!
//! A gossiped message carries identity, author and body only. Timestamps
//! never cross the wire: the receiving node assigns its own clock when it
//! first observes a message, so a remote node's clock is never trusted
//! for ordering or eviction.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::types::MessageId;

/// The JSON wire form of one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Globally unique message identity.
    pub id: MessageId,
    /// Sender display name.
    pub author: String,
    /// Message text.
    pub body: String,
}

impl WireMessage {
    /// Encode to bytes.
    ///
    /// Serializing well-formed in-memory state cannot fail; if it does,
    /// that is a programming-contract violation, not a runtime condition.
    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("in-memory message is always serializable")
    }

    /// Decode from bytes received off the wire.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(raw)?)
    }
}
