//! The chat message value type.

use crate::types::MessageId;
use crate::wire::WireMessage;

/// An immutable chat message.
///
/// `created_at` is Unix milliseconds assigned on this node, either at
/// authorship ([`Message::new`]) or on first observation of a remote
/// message ([`Message::from_wire`]). Two nodes may hold close-in-time but
/// unequal clocks for the same logical message; ordering and eviction use
/// whatever value the local log recorded at first insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Globally unique identity.
    pub id: MessageId,
    /// Display name of the sender. Opaque.
    pub author: String,
    /// Message text. Opaque.
    pub body: String,
    /// Local receipt clock, Unix milliseconds.
    pub created_at: i64,
}

impl Message {
    /// Author a new message on this node: fresh identity, local clock.
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: MessageId::random(),
            author: author.into(),
            body: body.into(),
            created_at: now_millis(),
        }
    }

    /// Adopt a remote message: keep its identity, author and body, and
    /// stamp it with this node's clock.
    pub fn from_wire(wire: WireMessage) -> Self {
        Self {
            id: wire.id,
            author: wire.author,
            body: wire.body,
            created_at: now_millis(),
        }
    }

    /// The wire form of this message. The local clock is not transmitted.
    pub fn to_wire(&self) -> WireMessage {
        WireMessage {
            id: self.id,
            author: self.author.clone(),
            body: self.body.clone(),
        }
    }
}

/// Current time in Unix milliseconds.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_identity_and_clock() {
        let before = now_millis();
        let msg = Message::new("alice", "hello");
        assert_ne!(msg.id, MessageId::NIL);
        assert!(msg.created_at >= before);
        assert_eq!(msg.author, "alice");
        assert_eq!(msg.body, "hello");
    }

    #[test]
    fn test_from_wire_keeps_identity_restamps_clock() {
        let original = Message::new("bob", "hi there");
        let wire = original.to_wire();
        let adopted = Message::from_wire(wire);

        assert_eq!(adopted.id, original.id);
        assert_eq!(adopted.author, original.author);
        assert_eq!(adopted.body, original.body);
        // The clock is local, not copied from the wire.
        assert!(adopted.created_at >= original.created_at);
    }
}
