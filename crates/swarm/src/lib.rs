//! One logical peer swarm over two heterogeneous transports.
//!
//! A [`Swarm`] joins and leaves shared discovery topics and publishes one
//! unified stream of peer connection/disconnection events, regardless of
//! whether the WebRTC discovery swarm or the WebSocket relay carried the
//! peer. The transports themselves stay behind the [`transport`] boundary
//! traits; this crate normalizes their differently-shaped peer records into
//! one schema, keeps the shared registry of live connections, and sequences
//! startup and shutdown across both.

pub mod config;
pub mod error;
pub mod swarm;
pub mod transport;

pub use config::{JoinOptions, SwarmConfig, SwarmOptions, WebrtcConfig, WsProxyConfig};
pub use error::SwarmError;
pub use swarm::{Connectivity, Lifecycle, Swarm, SwarmStatus};
pub use transport::{WebrtcEvent, WebrtcSwarm, WsProxyClient, WsProxyEvent};

pub use webswarm_peers::{
    PeerEndpoint, PeerEntry, PeerInfo, PeerRegistry, SwarmEvent, SwarmEventEmitter, TransportKind,
    WebrtcPeerInfo,
};
