//! Unified connection events and non-blocking broadcast emitter.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::info::PeerInfo;

/// Normalized connection transition from either sub-swarm.
///
/// Emitted synchronously with respect to the originating sub-swarm's own event
/// timing; no buffering or reordering is introduced. Registry-internal
/// overwrites emit nothing.
#[derive(Debug)]
pub enum SwarmEvent<C> {
    Connection { connection: Arc<C>, info: PeerInfo },
    Disconnection { connection: Arc<C>, info: PeerInfo },
}

impl<C> Clone for SwarmEvent<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Connection { connection, info } => Self::Connection {
                connection: Arc::clone(connection),
                info: info.clone(),
            },
            Self::Disconnection { connection, info } => Self::Disconnection {
                connection: Arc::clone(connection),
                info: info.clone(),
            },
        }
    }
}

impl<C> SwarmEvent<C> {
    pub fn info(&self) -> &PeerInfo {
        match self {
            Self::Connection { info, .. } | Self::Disconnection { info, .. } => info,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Non-blocking broadcast emitter. Every subscriber receives every event in
/// emission order; slow subscribers drop events independently.
#[derive(Debug)]
pub struct SwarmEventEmitter<C> {
    tx: broadcast::Sender<SwarmEvent<C>>,
}

impl<C> Clone for SwarmEventEmitter<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C> Default for SwarmEventEmitter<C> {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl<C> SwarmEventEmitter<C> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Dispatch an event to all current subscribers. A send with no
    /// subscribers is a no-op.
    pub fn emit(&self, event: SwarmEvent<C>) {
        let _ = self.tx.send(event);
    }

    pub fn connection(&self, connection: Arc<C>, info: PeerInfo) {
        self.emit(SwarmEvent::Connection { connection, info });
    }

    pub fn disconnection(&self, connection: Arc<C>, info: PeerInfo) {
        self.emit(SwarmEvent::Disconnection { connection, info });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SwarmEvent<C>> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
