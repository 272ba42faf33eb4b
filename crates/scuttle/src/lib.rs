//! # Scuttle
//!
//! A peer-to-peer chat log replicated over a gossip transport.
//!
//! ## Overview
//!
//! The gossip/membership transport (node discovery, failure detection,
//! message delivery) is an external collaborator; Scuttle supplies the
//! state it disseminates. The hard part is the **replicated message
//! log**: a bounded, deduplicated set of chat messages that converges
//! across nodes despite out-of-order delivery, duplicate delivery via
//! redundant gossip paths, and partial views repaired only through
//! periodic full-state reconciliation.
//!
//! This crate is the glue layer: it adapts the log, the reconciliation
//! codec and the broadcast queue to the transport's callback contract and
//! fans out every visible change to consumers (the UI) through bounded,
//! best-effort channels.
//!
//! ## Key Types
//!
//! - [`ChatDelegate`] - Implements [`GossipDelegate`], the four callbacks
//!   the transport drives, plus the local-authorship path
//! - [`Roster`] - Implements [`MemberEvents`], the membership callbacks
//! - [`ChatConfig`] - Tunables, validated at construction
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scuttle::{ChatConfig, ChatDelegate, Roster};
//! use scuttle_core::Message;
//!
//! let (delegate, mut updates) = ChatDelegate::new(ChatConfig::default()).unwrap();
//! let delegate = Arc::new(delegate);
//! let (roster, members) = Roster::new(delegate.queue().node_counter(), 10);
//!
//! // Hand `delegate` and `roster` to the gossip transport, then author:
//! delegate.submit(Message::new("alice", "ahoy"));
//! let history = updates.blocking_recv().unwrap();
//! assert_eq!(history.len(), 1);
//! # let _ = (roster, members);
//! ```

pub mod config;
pub mod delegate;
pub mod error;
pub mod membership;

// Re-export component crates
pub use scuttle_core as core;
pub use scuttle_log as log;
pub use scuttle_sync as sync;

pub use config::ChatConfig;
pub use delegate::{ChatDelegate, GossipDelegate};
pub use error::{ChatError, Result};
pub use membership::{MemberEvents, Roster};

// Re-export commonly used types
pub use scuttle_core::{Message, MessageId, WireMessage};
pub use scuttle_log::{MergeStats, MessageLog, PutOutcome};
pub use scuttle_sync::{MessageBroadcast, TransmitQueue};
