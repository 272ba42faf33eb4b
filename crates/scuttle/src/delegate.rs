//! The gossip delegate: glue between the transport and the message log.
//!
//! The external transport invokes these callbacks at arbitrary,
//! possibly-concurrent, possibly-high-frequency times, and never
//! serializes them for us. Every path here holds the log's lock only for
//! the in-memory mutation and publishes through a non-blocking bounded
//! channel, so no callback can stall the transport's receive loop.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use scuttle_core::{Message, WireMessage};
use scuttle_log::MessageLog;
use scuttle_sync::{encode_log, merge_log, MessageBroadcast, TransmitQueue};

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};

/// The callback contract the gossip transport drives.
///
/// All methods must be safe to call concurrently with each other and with
/// local-message ingestion, and none may block the caller.
pub trait GossipDelegate: Send + Sync {
    /// Metadata to attach to this node's liveness announcements, up to
    /// `limit` bytes.
    fn node_meta(&self, limit: usize) -> Vec<u8>;

    /// One remote message arrived. Malformed payloads are logged and
    /// dropped; there is no retry.
    fn notify_message(&self, raw: &[u8]);

    /// Pending outgoing broadcasts for the transport's next send, packed
    /// into the `limit` byte budget with `overhead` bytes charged per
    /// payload.
    fn broadcasts(&self, overhead: usize, limit: usize) -> Vec<Bytes>;

    /// The full local state for a pairwise anti-entropy exchange.
    fn local_state(&self) -> Bytes;

    /// A peer's full state from a pairwise exchange; merged through the
    /// log's normal dedup/eviction rules.
    fn merge_remote_state(&self, buf: &[u8]);
}

/// Adapts the message log, broadcast queue and reconciliation codec to
/// the transport contract, and fans visible changes out to subscribers.
///
/// Every mutation that changes the externally-visible snapshot republishes
/// the full ordered message list on the updates channel. The channel is
/// bounded and best-effort: a publish against a full channel is dropped
/// (the next change republishes a fresher snapshot anyway), so a slow
/// consumer can never stall a delivery callback.
pub struct ChatDelegate {
    log: Arc<MessageLog>,
    queue: TransmitQueue,
    updates: mpsc::Sender<Vec<Message>>,
}

impl ChatDelegate {
    /// Build a delegate and the receiving end of its updates channel.
    pub fn new(config: ChatConfig) -> Result<(Self, mpsc::Receiver<Vec<Message>>)> {
        if config.update_buffer == 0 {
            return Err(ChatError::ZeroChannelCapacity);
        }
        if config.retransmit_mult == 0 {
            return Err(ChatError::ZeroRetransmitMult);
        }
        let log = Arc::new(MessageLog::new(config.history)?);
        let (updates, rx) = mpsc::channel(config.update_buffer);
        Ok((
            Self {
                log,
                queue: TransmitQueue::new(config.retransmit_mult),
                updates,
            },
            rx,
        ))
    }

    /// The shared message log.
    pub fn log(&self) -> &Arc<MessageLog> {
        &self.log
    }

    /// The pending-broadcast queue (for wiring the roster's node counter).
    pub fn queue(&self) -> &TransmitQueue {
        &self.queue
    }

    /// Local authorship: retain the message, queue it for gossip, and
    /// publish the new history.
    pub fn submit(&self, msg: Message) {
        let outcome = self.log.put(msg.clone());
        if outcome.changed() {
            self.queue.queue(MessageBroadcast::new(msg));
            self.publish();
        }
    }

    /// Consume locally-authored messages from `input` on a background
    /// task, feeding each through [`submit`].
    ///
    /// [`submit`]: ChatDelegate::submit
    pub fn spawn_ingest(self: Arc<Self>, mut input: mpsc::Receiver<Message>) -> JoinHandle<()> {
        let delegate = self;
        tokio::spawn(async move {
            while let Some(msg) = input.recv().await {
                delegate.submit(msg);
            }
            debug!("local ingest channel closed");
        })
    }

    fn publish(&self) {
        match self.updates.try_send(self.log.snapshot()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("updates channel full, dropping history publish");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!("updates channel closed, dropping history publish");
            }
        }
    }
}

impl GossipDelegate for ChatDelegate {
    fn node_meta(&self, _limit: usize) -> Vec<u8> {
        Vec::new()
    }

    fn notify_message(&self, raw: &[u8]) {
        let wire = match WireMessage::decode(raw) {
            Ok(wire) => wire,
            Err(err) => {
                warn!(%err, "dropping undecodable gossip message");
                return;
            }
        };
        if self.log.put(Message::from_wire(wire)).changed() {
            self.publish();
        }
    }

    fn broadcasts(&self, overhead: usize, limit: usize) -> Vec<Bytes> {
        self.queue.get_broadcasts(overhead, limit)
    }

    fn local_state(&self) -> Bytes {
        encode_log(&self.log)
    }

    fn merge_remote_state(&self, buf: &[u8]) {
        match merge_log(&self.log, buf) {
            Ok(stats) if stats.changed() => self.publish(),
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "dropping undecodable remote state");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delegate_with_buffer(buffer: usize) -> (ChatDelegate, mpsc::Receiver<Vec<Message>>) {
        ChatDelegate::new(ChatConfig {
            update_buffer: buffer,
            ..ChatConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_publishes_history() {
        let (delegate, mut updates) = delegate_with_buffer(4);
        delegate.submit(Message::new("alice", "first"));
        delegate.submit(Message::new("alice", "second"));

        let snap = updates.recv().await.unwrap();
        assert_eq!(snap.len(), 1);
        let snap = updates.recv().await.unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(delegate.queue().len(), 2);
    }

    #[tokio::test]
    async fn test_remote_delivery_roundtrip() {
        let (delegate, mut updates) = delegate_with_buffer(4);
        let msg = Message::new("bob", "over the wire");

        delegate.notify_message(&msg.to_wire().encode());
        let snap = updates.recv().await.unwrap();
        assert_eq!(snap[0].id, msg.id);

        // Duplicate delivery via a redundant path: no new publish.
        delegate.notify_message(&msg.to_wire().encode());
        assert_eq!(delegate.log().len(), 1);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_garbage_delivery_is_dropped() {
        let (delegate, mut updates) = delegate_with_buffer(4);
        delegate.notify_message(b"\x00\x01 nonsense");
        assert!(delegate.log().is_empty());
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_state_exchange_between_delegates() {
        let (a, _a_updates) = delegate_with_buffer(4);
        let (b, mut b_updates) = delegate_with_buffer(4);

        a.submit(Message::new("alice", "hi"));
        a.submit(Message::new("alice", "anyone there?"));

        b.merge_remote_state(&a.local_state());
        assert_eq!(b.log().len(), 2);
        assert_eq!(b_updates.recv().await.unwrap().len(), 2);

        // Merging the same state again changes nothing and stays quiet.
        b.merge_remote_state(&a.local_state());
        assert_eq!(b.log().len(), 2);
        assert!(b_updates.try_recv().is_err());

        // Malformed state is dropped without touching the log.
        b.merge_remote_state(b"][");
        assert_eq!(b.log().len(), 2);
    }

    #[tokio::test]
    async fn test_full_updates_channel_never_blocks() {
        let (delegate, mut updates) = delegate_with_buffer(1);
        for i in 0..10 {
            delegate.submit(Message::new("flood", format!("msg {i}")));
        }
        // All ten submissions landed in the log even though most
        // publishes were dropped against the full channel.
        assert_eq!(delegate.log().len(), 10);
        assert_eq!(updates.recv().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_task_feeds_submit() {
        let (delegate, mut updates) = delegate_with_buffer(4);
        let delegate = Arc::new(delegate);
        let (tx, rx) = mpsc::channel(4);
        let handle = Arc::clone(&delegate).spawn_ingest(rx);

        tx.send(Message::new("carol", "via channel")).await.unwrap();
        let snap = updates.recv().await.unwrap();
        assert_eq!(snap[0].author, "carol");

        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_broadcasts_drain_through_queue() {
        let (delegate, _updates) = delegate_with_buffer(4);
        delegate.submit(Message::new("dave", "gossip me"));

        let payloads = delegate.broadcasts(8, 1024);
        assert_eq!(payloads.len(), 1);
        let wire = WireMessage::decode(&payloads[0]).unwrap();
        assert_eq!(wire.body, "gossip me");
    }

    #[test]
    fn test_zero_update_buffer_refused() {
        let result = ChatDelegate::new(ChatConfig {
            update_buffer: 0,
            ..ChatConfig::default()
        });
        assert!(matches!(result, Err(ChatError::ZeroChannelCapacity)));
    }

    #[test]
    fn test_zero_retransmit_mult_refused() {
        let result = ChatDelegate::new(ChatConfig {
            retransmit_mult: 0,
            ..ChatConfig::default()
        });
        assert!(matches!(result, Err(ChatError::ZeroRetransmitMult)));
    }

    #[test]
    fn test_zero_history_refused() {
        let result = ChatDelegate::new(ChatConfig {
            history: 0,
            ..ChatConfig::default()
        });
        assert!(matches!(result, Err(ChatError::Config(_))));
    }
}
