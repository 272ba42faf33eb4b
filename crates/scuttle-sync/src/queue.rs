//! Transmission-limited broadcast queue.
//!
//! Holds pending gossip broadcasts between transport ticks. Each entry is
//! retransmitted a bounded number of times, scaled logarithmically with
//! cluster size, and the transport drains the queue up to a per-tick byte
//! budget. Enqueuing a broadcast first prunes pending entries it
//! invalidates (same message identity riding a redundant path).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tracing::trace;

use crate::broadcast::Broadcast;

/// How many times an entry is transmitted before it is retired.
///
/// `mult * ceil(log10(nodes + 1))`: enough repeats for gossip to reach a
/// cluster of the given size with high probability, without rebroadcasting
/// forever. A cluster of one still transmits once so a lone node's
/// backlog drains when a peer joins mid-tick.
pub fn retransmit_limit(mult: usize, nodes: usize) -> usize {
    let nodes = nodes.max(1);
    mult * (((nodes + 1) as f64).log10().ceil() as usize)
}

struct Queued {
    broadcast: Box<dyn Broadcast>,
    transmits: usize,
}

/// The pending-broadcast queue one node feeds its gossip transport from.
///
/// Thread-safe; the transport drains it from its send loop while delivery
/// callbacks enqueue concurrently.
pub struct TransmitQueue {
    retransmit_mult: usize,
    num_nodes: Arc<AtomicUsize>,
    inner: Mutex<Vec<Queued>>,
}

impl TransmitQueue {
    /// Create an empty queue.
    ///
    /// The live-node count starts at 1 (ourselves) and is kept current
    /// through the handle returned by [`node_counter`].
    ///
    /// [`node_counter`]: TransmitQueue::node_counter
    pub fn new(retransmit_mult: usize) -> Self {
        Self {
            retransmit_mult,
            num_nodes: Arc::new(AtomicUsize::new(1)),
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Shared counter of live cluster members, updated by the membership
    /// roster as nodes join and leave.
    pub fn node_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.num_nodes)
    }

    /// Number of pending broadcasts.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enqueue a broadcast, pruning pending entries it supersedes.
    pub fn queue(&self, broadcast: impl Broadcast + 'static) {
        let mut inner = self.inner.lock().unwrap();
        inner.retain(|pending| {
            if broadcast.invalidates(pending.broadcast.payload()) {
                pending.broadcast.finished();
                false
            } else {
                true
            }
        });
        inner.push(Queued {
            broadcast: Box::new(broadcast),
            transmits: 0,
        });
        trace!(pending = inner.len(), "queued broadcast");
    }

    /// Drain payloads for one transport tick.
    ///
    /// Packs payloads into the `limit` byte budget, charging `overhead`
    /// bytes per payload on top of its length; payloads that do not fit
    /// are skipped in favour of smaller ones, as the budget reflects a
    /// packet size, not a rate. Least-transmitted entries go first so
    /// fresh messages are never starved by an old backlog. Entries that
    /// reach the retransmit limit are retired after the tick.
    pub fn get_broadcasts(&self, overhead: usize, limit: usize) -> Vec<Bytes> {
        let max_transmits =
            retransmit_limit(self.retransmit_mult, self.num_nodes.load(Ordering::Relaxed));

        let mut inner = self.inner.lock().unwrap();
        inner.sort_by_key(|q| q.transmits);

        let mut used = 0;
        let mut out = Vec::new();
        for queued in inner.iter_mut() {
            let cost = overhead + queued.broadcast.payload().len();
            if used + cost > limit {
                continue;
            }
            used += cost;
            queued.transmits += 1;
            out.push(Bytes::copy_from_slice(queued.broadcast.payload()));
        }

        inner.retain(|queued| {
            if queued.transmits >= max_transmits {
                queued.broadcast.finished();
                false
            } else {
                true
            }
        });

        out
    }
}
