//! Error types for swarm lifecycle operations.

/// Errors surfaced by the unified swarm.
///
/// Transport-level failures (signaling unreachable, relay disconnects) are
/// owned and retried inside the transports and never surface here except as
/// connection/disconnection events.
#[derive(Debug, thiserror::Error)]
pub enum SwarmError {
    /// The swarm was destroyed; destruction is terminal and every subsequent
    /// operation is rejected.
    #[error("swarm has been destroyed")]
    Destroyed,

    /// A direct connect through the relay client failed.
    #[error("proxy connect failed: {0}")]
    Connect(String),
}
