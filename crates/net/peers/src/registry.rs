//! Registry of live peer connections keyed by endpoint host.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::info::PeerInfo;

/// A live connection together with its canonical descriptor.
#[derive(Debug)]
pub struct PeerEntry<C> {
    pub connection: Arc<C>,
    pub info: PeerInfo,
}

impl<C> Clone for PeerEntry<C> {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
            info: self.info.clone(),
        }
    }
}

impl<C> PeerEntry<C> {
    pub fn new(connection: Arc<C>, info: PeerInfo) -> Self {
        Self { connection, info }
    }
}

/// Host-keyed map of currently connected peers across both transports.
///
/// The host identifier is unique per live connection within one transport, but
/// the two transports' identifier spaces may collide; a colliding `record`
/// silently overwrites (last writer wins, no deduplication even when the
/// descriptor claims support for it).
#[derive(Debug)]
pub struct PeerRegistry<C> {
    peers: RwLock<HashMap<String, PeerEntry<C>>>,
}

impl<C> Default for PeerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> PeerRegistry<C> {
    pub fn new() -> Self {
        Self {
            peers: RwLock::new(HashMap::new()),
        }
    }

    /// Store an entry under its descriptor's endpoint host. Returns the
    /// displaced entry when the key was already present.
    pub fn record(&self, entry: PeerEntry<C>) -> Option<PeerEntry<C>> {
        let host = entry.info.endpoint.host.clone();
        let displaced = self.peers.write().insert(host.clone(), entry);
        debug!(%host, replaced = displaced.is_some(), "peer recorded");
        displaced
    }

    /// Remove the entry for `host`, returning it if present.
    pub fn remove(&self, host: &str) -> Option<PeerEntry<C>> {
        let removed = self.peers.write().remove(host);
        if removed.is_some() {
            debug!(%host, "peer removed");
        }
        removed
    }

    pub fn get(&self, host: &str) -> Option<PeerEntry<C>> {
        self.peers.read().get(host).cloned()
    }

    pub fn contains(&self, host: &str) -> bool {
        self.peers.read().contains_key(host)
    }

    /// Snapshot of all current entries in no specified order. Later registry
    /// mutations are not reflected in a previously obtained snapshot.
    pub fn list(&self) -> Vec<PeerEntry<C>> {
        self.peers.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.peers.write().clear();
    }
}
