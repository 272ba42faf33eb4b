//! # Scuttle Core
//!
//! Pure data types for the Scuttle replicated chat log: messages,
//! identities, and the wire formats exchanged over the gossip transport.
//!
//! This crate contains no I/O, no locking, no networking. It is plain
//! data plus (de)serialization.
//!
//! ## Key Types
//!
//! - [`Message`] - An immutable chat message with a locally-assigned clock
//! - [`MessageId`] - Globally unique message identity (UUID v4)
//! - [`WireMessage`] - The single-message wire form (no timestamp)
//! - [`DecodeError`] - Malformed-payload error (local, non-fatal)
//!
//! ## Clock semantics
//!
//! `created_at` is assigned by whichever node authors a message or first
//! observes it off the wire. It is a local approximation used for ordering
//! and eviction, never an authoritative causal timestamp, which is why
//! [`WireMessage`] carries no timestamp at all.

pub mod error;
pub mod message;
pub mod types;
pub mod wire;

pub use error::DecodeError;
pub use message::{now_millis, Message};
pub use types::MessageId;
pub use wire::WireMessage;
