//! In-memory mock transports for driving the lifecycle controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use webswarm::transport::{WebrtcEvent, WebrtcSwarm, WsProxyClient, WsProxyEvent};
use webswarm::{JoinOptions, Swarm, SwarmError, SwarmOptions};

#[derive(Debug)]
pub struct MockConn;

/// Records every call the controller makes into the transports.
#[derive(Debug, Default)]
pub struct TransportLog {
    pub webrtc_starts: AtomicUsize,
    pub ws_starts: AtomicUsize,
    /// Teardown checkpoints, in the order they happened.
    pub teardown: Mutex<Vec<&'static str>>,
    /// (transport, topic) pairs for join calls.
    pub joins: Mutex<Vec<(&'static str, String)>>,
    /// (transport, topic) pairs for leave calls.
    pub leaves: Mutex<Vec<(&'static str, String)>>,
    /// Peer hints handed to the relay client's direct connect.
    pub connects: Mutex<Vec<String>>,
}

pub struct MockWebrtc {
    log: Arc<TransportLog>,
}

#[async_trait]
impl WebrtcSwarm for MockWebrtc {
    type Connection = MockConn;

    async fn join(&self, topic: &str) {
        self.log.joins.lock().push(("webrtc", topic.to_string()));
    }

    async fn leave(&self, topic: &str) {
        self.log.leaves.lock().push(("webrtc", topic.to_string()));
    }

    async fn close(&self) {
        self.log.teardown.lock().push("webrtc-close-begin");
        tokio::task::yield_now().await;
        self.log.teardown.lock().push("webrtc-close-end");
    }
}

pub struct MockProxy {
    log: Arc<TransportLog>,
}

#[async_trait]
impl WsProxyClient for MockProxy {
    type Connection = MockConn;

    async fn join(&self, topic: &str, _opts: JoinOptions) {
        self.log.joins.lock().push(("ws", topic.to_string()));
    }

    async fn leave(&self, topic: &str) {
        self.log.leaves.lock().push(("ws", topic.to_string()));
    }

    async fn connect(&self, peer: &str) -> Result<Arc<MockConn>, SwarmError> {
        self.log.connects.lock().push(peer.to_string());
        Ok(Arc::new(MockConn))
    }

    async fn destroy(&self) {
        self.log.teardown.lock().push("ws-destroy-begin");
        tokio::task::yield_now().await;
        self.log.teardown.lock().push("ws-destroy-end");
    }
}

pub struct Harness {
    pub swarm: Swarm<MockWebrtc, MockProxy>,
    pub log: Arc<TransportLog>,
    pub webrtc_tx: mpsc::UnboundedSender<WebrtcEvent<MockConn>>,
    pub ws_tx: mpsc::UnboundedSender<WsProxyEvent<MockConn>>,
}

/// Build a swarm wired to mock transports. The starters hand out each event
/// receiver exactly once; a second start of either transport panics.
pub fn harness(options: SwarmOptions) -> Harness {
    let log = Arc::new(TransportLog::default());

    let (webrtc_tx, webrtc_rx) = mpsc::unbounded_channel();
    let (ws_tx, ws_rx) = mpsc::unbounded_channel();
    let webrtc_rx = Mutex::new(Some(webrtc_rx));
    let ws_rx = Mutex::new(Some(ws_rx));

    let webrtc_log = Arc::clone(&log);
    let ws_log = Arc::clone(&log);

    let swarm = Swarm::new(
        options,
        move |_config| {
            webrtc_log.webrtc_starts.fetch_add(1, Ordering::SeqCst);
            let rx = webrtc_rx.lock().take().expect("webrtc started more than once");
            (
                MockWebrtc {
                    log: Arc::clone(&webrtc_log),
                },
                rx,
            )
        },
        move |_config| {
            ws_log.ws_starts.fetch_add(1, Ordering::SeqCst);
            let rx = ws_rx.lock().take().expect("ws proxy started more than once");
            (
                MockProxy {
                    log: Arc::clone(&ws_log),
                },
                rx,
            )
        },
    );

    Harness {
        swarm,
        log,
        webrtc_tx,
        ws_tx,
    }
}
