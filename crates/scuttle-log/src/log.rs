//! The bounded, deduplicated, time-ordered message log.
//!
//! One `MessageLog` is created at node startup with a fixed capacity and
//! mutated for the lifetime of the process by local authorship, remote
//! single-message delivery, and remote snapshot merges. There is no
//! persistence: the replica dies with the process and is repaired from
//! peers on the next start.

use std::collections::HashSet;
use std::sync::RwLock;

use tracing::{debug, trace};

use scuttle_core::{Message, MessageId};

use crate::error::ConfigError;

/// Outcome of a [`MessageLog::put`].
///
/// Rejections are routine results of the dedup/eviction policy, not
/// errors, so they are reported as explicit variants rather than through
/// an error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The message was new and is now retained.
    Inserted,
    /// The identity was already known; the stored fields win.
    DuplicateIgnored,
    /// The log is full and the message is older than everything retained.
    TooOld,
}

impl PutOutcome {
    /// Whether this put changed the externally-visible snapshot.
    pub fn changed(&self) -> bool {
        matches!(self, PutOutcome::Inserted)
    }
}

/// Tally of a bulk insert (one reconciliation pass).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Messages newly retained.
    pub inserted: usize,
    /// Messages whose identity was already known.
    pub duplicates: usize,
    /// Messages rejected as older than the retained window.
    pub rejected: usize,
}

impl MergeStats {
    /// Whether the merge changed the externally-visible snapshot.
    pub fn changed(&self) -> bool {
        self.inserted > 0
    }
}

/// The per-node replica of chat history.
///
/// Thread-safe: every operation takes `&self` and serializes through one
/// internal lock, held only for the in-memory mutation or read, never
/// across I/O. The backing containers are never exposed; callers interact
/// only through [`put`], [`extend`] and [`snapshot`], which preserve the
/// invariants:
///
/// - `ids.len() == ordered.len() <= capacity`
/// - `ordered` is sorted by `created_at` ascending (ties keep insertion
///   order)
/// - no two retained messages share an identity
///
/// [`put`]: MessageLog::put
/// [`extend`]: MessageLog::extend
/// [`snapshot`]: MessageLog::snapshot
pub struct MessageLog {
    capacity: usize,
    inner: RwLock<LogInner>,
}

struct LogInner {
    /// Authoritative dedup set.
    ids: HashSet<MessageId>,
    /// Messages ordered by `created_at` ascending.
    ordered: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log retaining at most `capacity` messages.
    ///
    /// A zero capacity is a contract violation and refuses to construct.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            inner: RwLock::new(LogInner {
                ids: HashSet::new(),
                ordered: Vec::new(),
            }),
        })
    }

    /// Maximum number of distinct identities retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of messages currently retained.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().ordered.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert one message, applying the dedup and eviction rules.
    ///
    /// - A known identity is ignored (first write wins; the stored fields
    ///   are never overwritten, even if the new copy differs).
    /// - When the log is full, a message strictly older than the oldest
    ///   retained entry is rejected rather than stored and immediately
    ///   evicted.
    /// - Otherwise the message is inserted in timestamp order and the
    ///   oldest entries beyond `capacity` are evicted.
    ///
    /// Note on merge ordering: the too-old cutoff compares against the
    /// *current* oldest retained entry, so when two full replicas merge a
    /// union that exceeds capacity, application order can influence which
    /// window survives. Chat history is best-effort beyond the capacity
    /// boundary.
    pub fn put(&self, msg: Message) -> PutOutcome {
        let mut inner = self.inner.write().unwrap();
        let outcome = Self::put_locked(&mut inner, self.capacity, msg);
        trace!(retained = inner.ordered.len(), ?outcome, "put");
        outcome
    }

    /// Insert a batch under a single lock acquisition.
    ///
    /// Used by snapshot reconciliation so a merge is atomic with respect
    /// to concurrent readers: no `snapshot` call can observe a half-merged
    /// state.
    pub fn extend(&self, msgs: impl IntoIterator<Item = Message>) -> MergeStats {
        let mut inner = self.inner.write().unwrap();
        let mut stats = MergeStats::default();
        for msg in msgs {
            match Self::put_locked(&mut inner, self.capacity, msg) {
                PutOutcome::Inserted => stats.inserted += 1,
                PutOutcome::DuplicateIgnored => stats.duplicates += 1,
                PutOutcome::TooOld => stats.rejected += 1,
            }
        }
        stats
    }

    /// The current ordered message list, oldest first.
    pub fn snapshot(&self) -> Vec<Message> {
        self.inner.read().unwrap().ordered.clone()
    }

    fn put_locked(inner: &mut LogInner, capacity: usize, msg: Message) -> PutOutcome {
        if inner.ids.contains(&msg.id) {
            return PutOutcome::DuplicateIgnored;
        }

        if inner.ids.len() >= capacity {
            // Full, and older than everything we still care about.
            let oldest = &inner.ordered[0];
            if msg.created_at < oldest.created_at {
                debug!(id = %msg.id, "rejecting message older than retained window");
                return PutOutcome::TooOld;
            }
        }

        debug!(id = %msg.id, author = %msg.author, "retaining new message");
        inner.ids.insert(msg.id);
        // Stable position: after any retained message with an equal clock.
        let at = inner
            .ordered
            .partition_point(|m| m.created_at <= msg.created_at);
        inner.ordered.insert(at, msg);

        if inner.ordered.len() > capacity {
            let extra = inner.ordered.len() - capacity;
            for evicted in inner.ordered.drain(..extra) {
                inner.ids.remove(&evicted.id);
                debug!(id = %evicted.id, "evicted oldest message");
            }
        }

        PutOutcome::Inserted
    }
}
