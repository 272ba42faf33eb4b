//! Membership roster: the transport's join/leave notification sink.
//!
//! The transport may call these from multiple threads but never
//! concurrently for the same event stream, so the roster only needs a
//! plain mutex around its member set. The member list is published to
//! consumers through a bounded best-effort channel with the same
//! drop-if-full policy as the history updates.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Membership-change callbacks the gossip transport invokes.
pub trait MemberEvents: Send + Sync {
    /// A node was detected to have joined.
    fn notify_join(&self, name: &str);

    /// A node was detected to have left or failed.
    fn notify_leave(&self, name: &str);

    /// A node's metadata changed. Not implemented: the transport never
    /// triggers this in normal operation, and silently ignoring it would
    /// hide a contract change, so invocation aborts.
    fn notify_update(&self, name: &str);

    /// Two nodes claimed the same name. The transport resolves the
    /// conflict itself; this is informational only.
    fn notify_conflict(&self, _existing: &str, _other: &str) {}
}

/// Tracks live cluster members and publishes the sorted member list.
///
/// Also maintains the shared live-node counter the broadcast queue uses
/// to scale its retransmit limit.
pub struct Roster {
    members: Mutex<BTreeSet<String>>,
    count: Arc<AtomicUsize>,
    updates: mpsc::Sender<Vec<String>>,
}

impl Roster {
    /// Build a roster and the receiving end of its member-list channel.
    ///
    /// `count` is the queue's node counter (see
    /// [`TransmitQueue::node_counter`]).
    ///
    /// [`TransmitQueue::node_counter`]: scuttle_sync::TransmitQueue::node_counter
    pub fn new(count: Arc<AtomicUsize>, buffer: usize) -> (Self, mpsc::Receiver<Vec<String>>) {
        let (updates, rx) = mpsc::channel(buffer.max(1));
        (
            Self {
                members: Mutex::new(BTreeSet::new()),
                count,
                updates,
            },
            rx,
        )
    }

    /// The current sorted member list.
    pub fn members(&self) -> Vec<String> {
        self.members.lock().unwrap().iter().cloned().collect()
    }

    fn publish(&self, members: &BTreeSet<String>) {
        // A lone node still counts as a cluster of one.
        self.count.store(members.len().max(1), Ordering::Relaxed);
        if self.updates.try_send(members.iter().cloned().collect()).is_err() {
            debug!("member channel full or closed, dropping roster publish");
        }
    }
}

impl MemberEvents for Roster {
    fn notify_join(&self, name: &str) {
        let mut members = self.members.lock().unwrap();
        if !members.insert(name.to_string()) {
            return;
        }
        info!(node = name, total = members.len(), "node joined");
        self.publish(&members);
    }

    fn notify_leave(&self, name: &str) {
        let mut members = self.members.lock().unwrap();
        if !members.remove(name) {
            return;
        }
        info!(node = name, total = members.len(), "node left");
        self.publish(&members);
    }

    fn notify_update(&self, name: &str) {
        panic!("membership update for {name} is not implemented");
    }

    fn notify_conflict(&self, existing: &str, other: &str) {
        warn!(existing, other, "node name conflict");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(buffer: usize) -> (Roster, mpsc::Receiver<Vec<String>>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(1));
        let (roster, rx) = Roster::new(Arc::clone(&count), buffer);
        (roster, rx, count)
    }

    #[tokio::test]
    async fn test_join_publishes_sorted_list() {
        let (roster, mut rx, count) = roster(8);
        roster.notify_join("bravo");
        roster.notify_join("alpha");

        assert_eq!(rx.recv().await.unwrap(), vec!["bravo"]);
        assert_eq!(rx.recv().await.unwrap(), vec!["alpha", "bravo"]);
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_duplicate_join_and_unknown_leave_are_quiet() {
        let (roster, mut rx, _count) = roster(8);
        roster.notify_join("alpha");
        rx.recv().await.unwrap();

        roster.notify_join("alpha");
        roster.notify_leave("ghost");
        assert!(rx.try_recv().is_err());
        assert_eq!(roster.members(), vec!["alpha"]);
    }

    #[tokio::test]
    async fn test_leave_updates_count_with_floor_of_one() {
        let (roster, _rx, count) = roster(8);
        roster.notify_join("alpha");
        roster.notify_leave("alpha");
        assert!(roster.members().is_empty());
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_full_channel_drops_publish() {
        let (roster, _rx, _count) = roster(1);
        roster.notify_join("a");
        roster.notify_join("b");
        roster.notify_join("c");
        // No receiver draining: later publishes were dropped, the roster
        // itself stays authoritative.
        assert_eq!(roster.members(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_conflict_leaves_roster_untouched() {
        let (roster, mut rx, count) = roster(8);
        roster.notify_join("alpha");
        let _ = rx.try_recv();

        roster.notify_conflict("alpha", "impostor");
        assert_eq!(roster.members(), vec!["alpha"]);
        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    #[should_panic(expected = "not implemented")]
    fn test_notify_update_aborts() {
        let (roster, _rx, _count) = roster(1);
        roster.notify_update("anyone");
    }
}
