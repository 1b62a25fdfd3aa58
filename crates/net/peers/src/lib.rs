//! Transport-agnostic peer model: one canonical descriptor shape for peers
//! discovered over either swarm transport, the registry of live connections,
//! and the broadcast channel both transports publish through.

pub mod events;
pub mod info;
pub mod registry;

pub use events::{SwarmEvent, SwarmEventEmitter};
pub use info::{PeerEndpoint, PeerInfo, TransportKind, WebrtcPeerInfo};
pub use registry::{PeerEntry, PeerRegistry};
