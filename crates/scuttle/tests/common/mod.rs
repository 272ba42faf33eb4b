//! In-memory gossip driver for integration tests.
//!
//! Simulates the external transport: drains each node's broadcast queue
//! and delivers the payloads to every other node, and runs pairwise
//! push/pull state exchanges. No network, no timing; deterministic.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::mpsc;

use scuttle::{ChatConfig, ChatDelegate, GossipDelegate, Message};

/// Per-payload overhead the real transport would charge.
pub const OVERHEAD: usize = 8;

/// Route delegate tracing through the test harness. Safe to call more
/// than once; only the first call installs the subscriber.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub struct Node {
    pub delegate: Arc<ChatDelegate>,
    pub updates: mpsc::Receiver<Vec<Message>>,
}

pub struct Cluster {
    pub nodes: Vec<Node>,
}

impl Cluster {
    /// Spin up `n` nodes with the given config, all aware of the cluster
    /// size so their retransmit limits are realistic.
    pub fn new(n: usize, config: ChatConfig) -> Self {
        init_tracing();
        let nodes: Vec<Node> = (0..n)
            .map(|_| {
                let (delegate, updates) = ChatDelegate::new(config.clone()).unwrap();
                delegate
                    .queue()
                    .node_counter()
                    .store(n, Ordering::Relaxed);
                Node {
                    delegate: Arc::new(delegate),
                    updates,
                }
            })
            .collect();
        Self { nodes }
    }

    /// One gossip round: every node drains its queue into the byte
    /// budget and the payloads are delivered to every other node.
    pub fn gossip_round(&self, budget: usize) {
        for (i, sender) in self.nodes.iter().enumerate() {
            let payloads = sender.delegate.broadcasts(OVERHEAD, budget);
            for payload in payloads {
                for (j, receiver) in self.nodes.iter().enumerate() {
                    if i != j {
                        receiver.delegate.notify_message(&payload);
                    }
                }
            }
        }
    }

    /// One anti-entropy exchange between nodes `a` and `b`, both ways.
    pub fn push_pull(&self, a: usize, b: usize) {
        let state_a = self.nodes[a].delegate.local_state();
        let state_b = self.nodes[b].delegate.local_state();
        self.nodes[a].delegate.merge_remote_state(&state_b);
        self.nodes[b].delegate.merge_remote_state(&state_a);
    }

    /// Sorted message-identity sets per node.
    pub fn id_sets(&self) -> Vec<Vec<String>> {
        self.nodes
            .iter()
            .map(|node| {
                let mut ids: Vec<String> = node
                    .delegate
                    .log()
                    .snapshot()
                    .iter()
                    .map(|m| m.id.to_string())
                    .collect();
                ids.sort();
                ids
            })
            .collect()
    }

    /// Whether every node holds the same message set.
    pub fn converged(&self) -> bool {
        let sets = self.id_sets();
        sets.windows(2).all(|w| w[0] == w[1])
    }
}
