//! The swarm lifecycle controller.
//!
//! Owns the two sub-swarm handles, performs idempotent lazy startup, sequences
//! orderly shutdown, and fans topic join/leave and connect operations out to
//! whichever sub-swarms are active. Raw transport events are normalized into
//! [`PeerInfo`], recorded in the shared [`PeerRegistry`], and re-published on
//! one unified broadcast channel.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, trace};
use webswarm_peers::{PeerEntry, PeerInfo, PeerRegistry, SwarmEvent, SwarmEventEmitter};

use crate::config::{JoinOptions, SwarmConfig, SwarmOptions};
use crate::error::SwarmError;
use crate::transport::{
    WebrtcEvent, WebrtcStarter, WebrtcSwarm, WsProxyClient, WsProxyEvent, WsProxyStarter,
};

/// Lifecycle states. There is no way back to `Constructed` or `Listening`
/// once `Destroyed` is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Constructed,
    Listening,
    Destroyed,
}

/// Connectivity report.
///
/// Always optimistic: this is a placeholder carried over from the original
/// design, not a measured value. Callers must not rely on it for real
/// network health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    pub bound: bool,
    pub bootstrapped: bool,
    pub holepunched: bool,
}

/// Discovery status report. Fixed at lookup-without-announce regardless of
/// actual operation; another documented placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmStatus {
    pub lookup: bool,
    pub announce: bool,
}

struct State<W, P> {
    lifecycle: Lifecycle,
    webrtc: Option<Arc<W>>,
    ws: Option<Arc<P>>,
}

/// One logical peer swarm over two heterogeneous transports.
///
/// Generic over the two transport collaborators; both must hand out the same
/// connection handle type. Sub-swarms are constructed lazily on the first
/// `listen`/`join`/`leave`/`connect`/`connectivity` call and torn down exactly
/// once by [`Swarm::destroy`].
pub struct Swarm<W, P>
where
    W: WebrtcSwarm,
    P: WsProxyClient<Connection = W::Connection>,
{
    config: SwarmConfig,
    registry: Arc<PeerRegistry<W::Connection>>,
    events: SwarmEventEmitter<W::Connection>,
    state: Mutex<State<W, P>>,
    webrtc_starter: WebrtcStarter<W>,
    ws_starter: WsProxyStarter<P>,
}

impl<W, P> Swarm<W, P>
where
    W: WebrtcSwarm,
    P: WsProxyClient<Connection = W::Connection>,
{
    /// Resolve `options` against the bootstrap defaults and build a swarm in
    /// the `Constructed` state. The starters are invoked once, on the first
    /// listen, to construct the actual transport clients.
    pub fn new<FW, FP>(options: SwarmOptions, webrtc_starter: FW, ws_starter: FP) -> Self
    where
        FW: Fn(
                &crate::config::WebrtcConfig,
            )
                -> (W, mpsc::UnboundedReceiver<WebrtcEvent<W::Connection>>)
            + Send
            + Sync
            + 'static,
        FP: Fn(
                &crate::config::WsProxyConfig,
            )
                -> (P, mpsc::UnboundedReceiver<WsProxyEvent<W::Connection>>)
            + Send
            + Sync
            + 'static,
    {
        Self {
            config: SwarmConfig::resolve(options),
            registry: Arc::new(PeerRegistry::new()),
            events: SwarmEventEmitter::default(),
            state: Mutex::new(State {
                lifecycle: Lifecycle::Constructed,
                webrtc: None,
                ws: None,
            }),
            webrtc_starter: Box::new(webrtc_starter),
            ws_starter: Box::new(ws_starter),
        }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lock().lifecycle
    }

    /// Start both sub-swarms. Idempotent: the first call transitions to
    /// `Listening` and starts each transport exactly once; later calls return
    /// immediately. Rejected after [`Swarm::destroy`].
    pub async fn listen(&self) -> Result<(), SwarmError> {
        let (webrtc_rx, ws_rx) = {
            let mut state = self.state.lock();
            match state.lifecycle {
                Lifecycle::Destroyed => return Err(SwarmError::Destroyed),
                Lifecycle::Listening => return Ok(()),
                Lifecycle::Constructed => {}
            }
            state.lifecycle = Lifecycle::Listening;

            let (webrtc, webrtc_rx) = (self.webrtc_starter)(&self.config.webrtc);
            let (ws, ws_rx) = (self.ws_starter)(&self.config.ws);
            state.webrtc = Some(Arc::new(webrtc));
            state.ws = Some(Arc::new(ws));

            (webrtc_rx, ws_rx)
        };

        debug!("sub-swarms started, listening");
        self.spawn_webrtc_forwarder(webrtc_rx);
        self.spawn_ws_forwarder(ws_rx);
        Ok(())
    }

    /// Join `topic` on both sub-swarms. Each transport manages its own
    /// discovery from then on; the two may independently connect overlapping
    /// peer sets.
    pub async fn join(&self, topic: &str, opts: JoinOptions) -> Result<(), SwarmError> {
        self.listen().await?;
        let (webrtc, ws) = self.handles()?;

        trace!(%topic, "joining topic on both transports");
        webrtc.join(topic).await;
        ws.join(topic, opts).await;
        Ok(())
    }

    /// Stop future discovery on `topic` on both sub-swarms. Peers already
    /// connected through that topic stay in the registry until their own
    /// disconnection events arrive.
    pub async fn leave(&self, topic: &str) -> Result<(), SwarmError> {
        self.listen().await?;
        let (webrtc, ws) = self.handles()?;

        trace!(%topic, "leaving topic on both transports");
        webrtc.leave(topic).await;
        ws.leave(topic).await;
        Ok(())
    }

    /// Connect directly to a peer. Forwarded to the relay client only; the
    /// WebRTC swarm has no direct-connect primitive, it is discovery-based.
    pub async fn connect(&self, peer: &str) -> Result<Arc<W::Connection>, SwarmError> {
        self.listen().await?;
        let (_, ws) = self.handles()?;
        ws.connect(peer).await
    }

    /// Report connectivity. Always `{bound, bootstrapped, holepunched} =
    /// true` regardless of actual transport state; see [`Connectivity`].
    pub async fn connectivity(&self) -> Result<Connectivity, SwarmError> {
        self.listen().await?;
        Ok(Connectivity {
            bound: true,
            bootstrapped: true,
            holepunched: true,
        })
    }

    /// Yield to the scheduler once. Does not wait for network quiescence; a
    /// documented no-op placeholder.
    pub async fn flush(&self) {
        tokio::task::yield_now().await;
    }

    /// Fixed lookup-without-announce report; see [`SwarmStatus`].
    pub fn status(&self) -> SwarmStatus {
        SwarmStatus {
            lookup: true,
            announce: false,
        }
    }

    /// Fixed placeholder address; no real socket is ever bound here.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    /// Snapshot of all currently connected peers across both transports.
    pub fn peers(&self) -> Vec<PeerEntry<W::Connection>> {
        self.registry.list()
    }

    /// Subscribe to the unified connection/disconnection event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SwarmEvent<W::Connection>> {
        self.events.subscribe()
    }

    /// Tear down both sub-swarms. Terminal and idempotent.
    ///
    /// The WebRTC swarm's teardown must complete before the relay client's
    /// begins: its final disconnection events still flow through the shared
    /// registry. Destroy before any listen is a valid transition straight to
    /// `Destroyed`; absent sub-swarm handles are simply skipped.
    pub async fn destroy(&self) {
        let (webrtc, ws) = {
            let mut state = self.state.lock();
            if state.lifecycle == Lifecycle::Destroyed {
                return;
            }
            state.lifecycle = Lifecycle::Destroyed;
            (state.webrtc.take(), state.ws.take())
        };

        if let Some(webrtc) = webrtc {
            webrtc.close().await;
        }
        if let Some(ws) = ws {
            ws.destroy().await;
        }
        debug!("swarm destroyed");
    }

    fn handles(&self) -> Result<(Arc<W>, Arc<P>), SwarmError> {
        let state = self.state.lock();
        match (&state.webrtc, &state.ws) {
            (Some(webrtc), Some(ws)) => Ok((Arc::clone(webrtc), Arc::clone(ws))),
            // Only reachable when destroy raced the caller between ensuring
            // listen and forwarding the operation.
            _ => Err(SwarmError::Destroyed),
        }
    }

    fn spawn_webrtc_forwarder(&self, mut rx: mpsc::UnboundedReceiver<WebrtcEvent<W::Connection>>) {
        let registry = Arc::clone(&self.registry);
        let events = self.events.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    WebrtcEvent::Connection { connection, info } => {
                        let info = PeerInfo::from(info);
                        registry.record(PeerEntry::new(Arc::clone(&connection), info.clone()));
                        events.connection(connection, info);
                    }
                    WebrtcEvent::ConnectionClosed { connection, info } => {
                        let info = PeerInfo::from(info);
                        registry.remove(info.host());
                        events.disconnection(connection, info);
                    }
                }
            }
            trace!("webrtc event stream ended");
        });
    }

    fn spawn_ws_forwarder(&self, mut rx: mpsc::UnboundedReceiver<WsProxyEvent<W::Connection>>) {
        let registry = Arc::clone(&self.registry);
        let events = self.events.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    WsProxyEvent::Connection { connection, info } => {
                        registry.record(PeerEntry::new(Arc::clone(&connection), info.clone()));
                        events.connection(connection, info);
                    }
                    WsProxyEvent::Disconnection { connection, info } => {
                        registry.remove(info.host());
                        events.disconnection(connection, info);
                    }
                }
            }
            trace!("ws proxy event stream ended");
        });
    }
}
