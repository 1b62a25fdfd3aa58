//! Swarm configuration, resolved once at construction and immutable after.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use webswarm_bootstrap::{proxy_endpoints, signal_endpoints};

/// Caller-supplied construction options. Every field is optional; defaults
/// come from [`webswarm_bootstrap`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmOptions {
    /// Shared base URLs; each derives both a signal and a proxy endpoint.
    pub bootstrap_base_urls: Vec<String>,
    /// Extra WebRTC signaling URLs, appended after the derived list.
    pub webrtc_bootstrap_urls: Vec<String>,
    /// Extra WebSocket relay URLs, appended after the derived list.
    pub ws_proxy_urls: Vec<String>,
    /// Peer-count ceiling handed to both transports.
    pub max_peers: Option<usize>,
    /// Opaque tuning blob passed through to the WebRTC transport.
    pub webrtc_tuning: Option<serde_json::Value>,
    /// Reconnect-delay override for the relay client.
    pub ws_reconnect_delay: Option<Duration>,
}

/// Resolved configuration for the WebRTC discovery swarm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebrtcConfig {
    pub bootstrap: Vec<String>,
    pub max_peers: Option<usize>,
    pub tuning: Option<serde_json::Value>,
}

/// Resolved configuration for the WebSocket relay client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsProxyConfig {
    pub proxy: Vec<String>,
    pub max_peers: Option<usize>,
    pub reconnect_delay: Option<Duration>,
}

/// Both sub-swarm configurations, partitioned per transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmConfig {
    pub webrtc: WebrtcConfig,
    pub ws: WsProxyConfig,
}

impl SwarmConfig {
    /// Merge caller options with defaults. URLs are not validated here; a
    /// malformed URL fails later inside the transport that dials it.
    pub fn resolve(options: SwarmOptions) -> Self {
        let SwarmOptions {
            bootstrap_base_urls,
            webrtc_bootstrap_urls,
            ws_proxy_urls,
            max_peers,
            webrtc_tuning,
            ws_reconnect_delay,
        } = options;

        Self {
            webrtc: WebrtcConfig {
                bootstrap: signal_endpoints(&bootstrap_base_urls, &webrtc_bootstrap_urls),
                max_peers,
                tuning: webrtc_tuning,
            },
            ws: WsProxyConfig {
                proxy: proxy_endpoints(&bootstrap_base_urls, &ws_proxy_urls),
                max_peers,
                reconnect_delay: ws_reconnect_delay,
            },
        }
    }
}

/// Topic join options forwarded to the relay client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    pub announce: bool,
    pub lookup: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            announce: false,
            lookup: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webswarm_bootstrap::{DEFAULT_PROXY_ENDPOINTS, DEFAULT_SIGNAL_ENDPOINTS};

    #[test]
    fn test_resolve_from_shared_base() {
        let config = SwarmConfig::resolve(SwarmOptions {
            bootstrap_base_urls: vec!["wss://x.com/".to_string()],
            ..Default::default()
        });

        assert_eq!(config.webrtc.bootstrap, vec!["wss://x.com/signal".to_string()]);
        assert_eq!(config.ws.proxy, vec!["wss://x.com/proxy".to_string()]);
    }

    #[test]
    fn test_resolve_defaults() {
        let config = SwarmConfig::resolve(SwarmOptions::default());

        assert_eq!(config.webrtc.bootstrap, DEFAULT_SIGNAL_ENDPOINTS);
        assert_eq!(config.ws.proxy, DEFAULT_PROXY_ENDPOINTS);
        assert!(config.webrtc.max_peers.is_none());
        assert!(config.ws.reconnect_delay.is_none());
    }

    #[test]
    fn test_resolve_carries_transport_options() {
        let config = SwarmConfig::resolve(SwarmOptions {
            max_peers: Some(24),
            webrtc_tuning: Some(serde_json::json!({ "trickle": true })),
            ws_reconnect_delay: Some(Duration::from_secs(3)),
            ..Default::default()
        });

        assert_eq!(config.webrtc.max_peers, Some(24));
        assert_eq!(config.ws.max_peers, Some(24));
        assert!(config.webrtc.tuning.is_some());
        assert_eq!(config.ws.reconnect_delay, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_overrides_extend_base_lists() {
        let config = SwarmConfig::resolve(SwarmOptions {
            bootstrap_base_urls: vec!["wss://x.com".to_string()],
            webrtc_bootstrap_urls: vec!["wss://signal.extra".to_string()],
            ws_proxy_urls: vec!["wss://proxy.extra".to_string()],
            ..Default::default()
        });

        assert_eq!(
            config.webrtc.bootstrap,
            vec!["wss://x.com/signal".to_string(), "wss://signal.extra".to_string()]
        );
        assert_eq!(
            config.ws.proxy,
            vec!["wss://x.com/proxy".to_string(), "wss://proxy.extra".to_string()]
        );
    }

    #[test]
    fn test_join_options_default() {
        let opts = JoinOptions::default();
        assert!(opts.lookup);
        assert!(!opts.announce);
    }
}
