//! Configuration for a chat node.

/// Tunables for the delegate and its channels.
///
/// Validated when the delegate is constructed; an invalid configuration
/// refuses to start rather than run with undefined behavior.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Maximum number of messages retained in the replica.
    pub history: usize,
    /// Capacity of the bounded history-update channel. Small on purpose:
    /// only the latest snapshot matters to consumers, and a publish
    /// against a full channel is dropped rather than blocking the
    /// mutation path.
    pub update_buffer: usize,
    /// Retransmission multiplier for the broadcast queue.
    pub retransmit_mult: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history: 100,
            update_buffer: 16,
            retransmit_mult: 4,
        }
    }
}
