//! HTTP upgrade dispatch for the combined swarm server.
//!
//! One listening socket serves both backends: upgrade requests on `/signal`
//! go to the WebRTC signaling server, every other upgrade goes to the
//! WebSocket relay. This is pure routing with no state of its own; the
//! handlers own their protocols entirely.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::any;
use tracing::debug;

/// Path that selects the signaling backend.
pub const SIGNAL_PATH: &str = "/signal";

/// Which backend an upgrade request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeTarget {
    Signal,
    Proxy,
}

/// Classify a request path. `/signal` selects the signaling server; every
/// other path falls through to the relay proxy.
pub fn classify_path(path: &str) -> UpgradeTarget {
    if path == SIGNAL_PATH {
        UpgradeTarget::Signal
    } else {
        UpgradeTarget::Proxy
    }
}

/// An upgraded-socket consumer: the signaling server or the relay server.
#[async_trait]
pub trait UpgradeHandler: Send + Sync + 'static {
    async fn handle(&self, socket: WebSocket);
}

#[derive(Clone)]
struct Dispatcher {
    signal: Arc<dyn UpgradeHandler>,
    proxy: Arc<dyn UpgradeHandler>,
}

/// Build the dispatch router over the two backend handlers.
pub fn router(signal: Arc<dyn UpgradeHandler>, proxy: Arc<dyn UpgradeHandler>) -> Router {
    let dispatcher = Dispatcher { signal, proxy };
    Router::new()
        .route(SIGNAL_PATH, any(signal_upgrade))
        .fallback(proxy_upgrade)
        .with_state(dispatcher)
}

async fn signal_upgrade(State(dispatcher): State<Dispatcher>, ws: WebSocketUpgrade) -> Response {
    debug!("upgrade routed to signaling server");
    ws.on_upgrade(move |socket| async move { dispatcher.signal.handle(socket).await })
}

async fn proxy_upgrade(State(dispatcher): State<Dispatcher>, ws: WebSocketUpgrade) -> Response {
    debug!("upgrade routed to relay proxy");
    ws.on_upgrade(move |socket| async move { dispatcher.proxy.handle(socket).await })
}
