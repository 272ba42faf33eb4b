//! Broadcast payloads and the invalidation predicate.
//!
//! The transmission-limited queue asks, for every new enqueue, whether a
//! previously-queued-but-not-yet-sent broadcast has become redundant. Two
//! broadcasts are redundant copies of each other exactly when they encode
//! the same message identity; pruning the stale one saves the bandwidth
//! of re-gossiping a message already travelling another path.

use tracing::debug;

use scuttle_core::{Message, WireMessage};

/// The outgoing-queue contract for a queued broadcast.
///
/// This is the seam the external transport's queue drives; the queue
/// itself never inspects payload bytes beyond handing them back out.
pub trait Broadcast: Send {
    /// The encoded payload to transmit.
    fn payload(&self) -> &[u8];

    /// Whether enqueuing `self` makes a pending broadcast with payload
    /// `pending` redundant.
    ///
    /// Must never fail: an undecodable `pending` payload simply does not
    /// get invalidated, so a malformed competing broadcast can never
    /// block delivery of a valid one.
    fn invalidates(&self, pending: &[u8]) -> bool;

    /// Invoked when the broadcast will no longer be transmitted, either
    /// through invalidation or because the retransmit limit was reached.
    fn finished(&self) {}
}

/// A chat message queued for gossip broadcast.
///
/// The payload is encoded once at enqueue time and reused across
/// retransmissions.
pub struct MessageBroadcast {
    message: Message,
    payload: Vec<u8>,
}

impl MessageBroadcast {
    /// Prepare a message for broadcast.
    pub fn new(message: Message) -> Self {
        let payload = message.to_wire().encode();
        Self { message, payload }
    }

    /// The message this broadcast carries.
    pub fn message(&self) -> &Message {
        &self.message
    }
}

impl Broadcast for MessageBroadcast {
    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn invalidates(&self, pending: &[u8]) -> bool {
        let other = match WireMessage::decode(pending) {
            Ok(other) => other,
            Err(_) => return false,
        };
        let invalidates = other.id == self.message.id;
        if invalidates {
            debug!(id = %self.message.id, "invalidated pending broadcast");
        }
        invalidates
    }
}
