//! Canonical peer descriptors and WebRTC normalization.
//!
//! The WebSocket relay already reports peers in the canonical shape, so only
//! WebRTC connection metadata needs active normalization. The two transports
//! assign host identifiers from unrelated spaces; no cross-transport identity
//! reconciliation is attempted.

use serde::{Deserialize, Serialize};

/// Which sub-swarm produced a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    /// WebRTC discovery swarm.
    WebrtcRelay,
    /// WebSocket-proxied relay swarm.
    WsProxy,
}

/// Where a peer was reached.
///
/// `host` is an opaque transport-assigned identifier: the signaling-assigned
/// peer id for WebRTC, the relay-assigned peer address for the proxy. It is
/// unique per live connection within a single transport only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEndpoint {
    /// Always 0 for WebRTC peers; no real port exists there.
    pub port: u16,
    pub host: String,
    /// The discovery key this peer was found under.
    pub topic: String,
}

/// Canonical peer record produced by normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub transport: TransportKind,
    /// Whether the local side initiated this connection.
    pub is_initiator: bool,
    pub endpoint: PeerEndpoint,
    /// Whether the originating transport can detect duplicate connections to
    /// this peer. Unconditionally false for WebRTC peers.
    pub dedup_supported: bool,
}

impl PeerInfo {
    /// The registry key for this peer.
    pub fn host(&self) -> &str {
        &self.endpoint.host
    }

    pub fn supports_deduplication(&self) -> bool {
        self.dedup_supported
    }

    /// Whether `other` is the same peer already known through this descriptor.
    ///
    /// Descriptors without deduplication support always answer false, so a
    /// WebRTC reconnect is never treated as a duplicate.
    pub fn deduplicate(&self, other: &PeerInfo) -> bool {
        self.dedup_supported
            && self.transport == other.transport
            && self.endpoint.host == other.endpoint.host
    }
}

/// Connection metadata as reported by the WebRTC discovery swarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebrtcPeerInfo {
    /// Signaling-assigned peer id.
    pub id: String,
    /// The joined discovery channel.
    pub channel: String,
    /// Whether the local side initiated the connection.
    pub initiator: bool,
}

impl From<WebrtcPeerInfo> for PeerInfo {
    fn from(raw: WebrtcPeerInfo) -> Self {
        Self {
            transport: TransportKind::WebrtcRelay,
            is_initiator: raw.initiator,
            endpoint: PeerEndpoint {
                port: 0,
                host: raw.id,
                topic: raw.channel,
            },
            // TODO: deduplication across WebRTC reconnects is unimplemented.
            dedup_supported: false,
        }
    }
}
