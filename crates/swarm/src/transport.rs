//! Boundary traits for the two transport collaborators.
//!
//! The WebRTC signaling mechanics and the relay wire protocol live behind
//! these traits; this crate only consumes their event streams. Each transport
//! delivers events over its own channel, so per-transport emission order is
//! preserved while no ordering exists between the two.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use webswarm_peers::{PeerInfo, WebrtcPeerInfo};

use crate::config::JoinOptions;
use crate::error::SwarmError;

/// Raw event from the WebRTC discovery swarm. Carries the transport-native
/// metadata shape; normalization happens in the lifecycle controller.
#[derive(Debug)]
pub enum WebrtcEvent<C> {
    Connection {
        connection: Arc<C>,
        info: WebrtcPeerInfo,
    },
    ConnectionClosed {
        connection: Arc<C>,
        info: WebrtcPeerInfo,
    },
}

/// Raw event from the WebSocket relay client. The relay already reports peers
/// in the canonical shape, so these pass through unchanged.
#[derive(Debug)]
pub enum WsProxyEvent<C> {
    Connection {
        connection: Arc<C>,
        info: PeerInfo,
    },
    Disconnection {
        connection: Arc<C>,
        info: PeerInfo,
    },
}

/// The WebRTC-based discovery swarm.
///
/// Join/leave/close are infallible at this boundary: internal failures are
/// the transport's to retry and surface only through its event stream.
#[async_trait]
pub trait WebrtcSwarm: Send + Sync + 'static {
    type Connection: Send + Sync + 'static;

    /// Start discovering and connecting peers on `topic`.
    async fn join(&self, topic: &str);

    /// Stop future discovery on `topic`. Existing connections are unaffected.
    async fn leave(&self, topic: &str);

    /// Tear the swarm down, resolving once teardown has completed and all
    /// final disconnection events have been delivered.
    async fn close(&self);
}

/// The WebSocket-proxied relay swarm.
#[async_trait]
pub trait WsProxyClient: Send + Sync + 'static {
    type Connection: Send + Sync + 'static;

    async fn join(&self, topic: &str, opts: JoinOptions);

    async fn leave(&self, topic: &str);

    /// Connect directly to a peer by relay-assigned address.
    async fn connect(&self, peer: &str) -> Result<Arc<Self::Connection>, SwarmError>;

    /// Tear the client down, resolving once teardown has completed.
    async fn destroy(&self);
}

/// Constructs a started WebRTC swarm and the channel its events arrive on.
pub type WebrtcStarter<W> = Box<
    dyn Fn(
            &crate::config::WebrtcConfig,
        ) -> (
            W,
            mpsc::UnboundedReceiver<WebrtcEvent<<W as WebrtcSwarm>::Connection>>,
        ) + Send
        + Sync,
>;

/// Constructs a started relay client and the channel its events arrive on.
pub type WsProxyStarter<P> = Box<
    dyn Fn(
            &crate::config::WsProxyConfig,
        ) -> (
            P,
            mpsc::UnboundedReceiver<WsProxyEvent<<P as WsProxyClient>::Connection>>,
        ) + Send
        + Sync,
>;
