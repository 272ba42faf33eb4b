//! Proptest generators for property-based testing.

use proptest::prelude::*;

use scuttle_core::{Message, MessageId, WireMessage};

/// Generate a random MessageId.
pub fn message_id() -> impl Strategy<Value = MessageId> {
    any::<[u8; 16]>().prop_map(MessageId::from_bytes)
}

/// Generate an author display name.
pub fn author() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_map(String::from)
}

/// Generate a message body, including empty and multi-line text.
pub fn body() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=64).prop_map(|chars| chars.into_iter().collect())
}

/// Generate a local-clock timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

/// Generate a full message with a pinned clock.
pub fn message() -> impl Strategy<Value = Message> {
    (message_id(), author(), body(), timestamp()).prop_map(|(id, author, body, created_at)| {
        Message {
            id,
            author,
            body,
            created_at,
        }
    })
}

/// Generate up to `max` messages with distinct identities.
pub fn message_batch(max: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(message(), 0..=max).prop_map(|mut msgs| {
        // Random ids can collide across generated entries; keep firsts.
        let mut seen = std::collections::HashSet::new();
        msgs.retain(|m| seen.insert(m.id));
        msgs
    })
}

/// Generate a wire message.
pub fn wire_message() -> impl Strategy<Value = WireMessage> {
    (message_id(), author(), body()).prop_map(|(id, author, body)| WireMessage {
        id,
        author,
        body,
    })
}
