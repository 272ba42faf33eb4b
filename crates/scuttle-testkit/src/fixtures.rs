//! Test fixtures and helpers.
//!
//! Messages here carry pinned clocks instead of the wall clock, so
//! ordering- and eviction-sensitive tests are deterministic.

use scuttle_core::{Message, MessageId};
use scuttle_log::{MessageLog, PutOutcome};

/// A message with an explicit clock value.
pub fn message_at(created_at: i64, body: &str) -> Message {
    Message {
        id: MessageId::random(),
        author: "fixture".into(),
        body: body.into(),
        created_at,
    }
}

/// A log plus seeding helpers.
pub struct LogFixture {
    pub log: MessageLog,
}

impl LogFixture {
    /// A fixture around an empty log of the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: MessageLog::new(capacity).expect("fixture capacity is nonzero"),
        }
    }

    /// Insert one message per clock value, in the given order, returning
    /// the inserted messages.
    pub fn seed(&self, stamps: &[i64]) -> Vec<Message> {
        stamps
            .iter()
            .map(|&ts| {
                let msg = message_at(ts, &format!("seeded@{ts}"));
                assert_eq!(self.log.put(msg.clone()), PutOutcome::Inserted);
                msg
            })
            .collect()
    }

    /// The clocks of the retained messages, oldest first.
    pub fn stamps(&self) -> Vec<i64> {
        self.log.snapshot().iter().map(|m| m.created_at).collect()
    }
}
