//! Bootstrap endpoint resolution for the two swarm transports.
//!
//! Both transports derive their endpoint lists from the same shared base URLs:
//! each base URL gets a transport-specific path segment appended (`signal` for
//! the WebRTC discovery swarm, `proxy` for the WebSocket relay), and any
//! transport-specific override URLs are concatenated after the derived list.
//! Overrides extend the base-derived list, they never replace it. If nothing
//! was configured at all, the transport falls back to its hardcoded default
//! endpoint set.
//!
//! No URL validation happens here. A malformed URL passes through untouched
//! and surfaces later as a connection failure inside the transport that tried
//! to dial it.

use tracing::debug;

/// Path segment appended to base URLs for the WebRTC signaling endpoint.
pub const SIGNAL_PATH: &str = "signal";

/// Path segment appended to base URLs for the WebSocket relay endpoint.
pub const PROXY_PATH: &str = "proxy";

/// Default WebRTC signaling servers, used when no bootstrap URLs are configured.
pub const DEFAULT_SIGNAL_ENDPOINTS: &[&str] = &[
    "wss://signal1.bitdht.com",
    "wss://signal2.bitdht.com",
    "wss://signal3.bitdht.com",
];

/// Default WebSocket relay servers, used when no proxy URLs are configured.
pub const DEFAULT_PROXY_ENDPOINTS: &[&str] = &["wss://proxy.bitdht.com"];

/// Derive endpoint URLs for one transport.
///
/// Strips exactly one trailing slash from each base URL, appends
/// `/<path_segment>`, then concatenates `overrides`. Returns `None` when the
/// combined result is empty so callers can fall back to their defaults.
pub fn resolve_endpoints(
    path_segment: &str,
    base_urls: &[String],
    overrides: &[String],
) -> Option<Vec<String>> {
    let mut urls: Vec<String> = base_urls
        .iter()
        .map(|url| {
            let trimmed = url.strip_suffix('/').unwrap_or(url);
            format!("{trimmed}/{path_segment}")
        })
        .collect();

    urls.extend(overrides.iter().cloned());

    if urls.is_empty() {
        return None;
    }
    Some(urls)
}

/// Effective WebRTC signaling endpoints, falling back to [`DEFAULT_SIGNAL_ENDPOINTS`].
pub fn signal_endpoints(base_urls: &[String], overrides: &[String]) -> Vec<String> {
    let endpoints = resolve_endpoints(SIGNAL_PATH, base_urls, overrides)
        .unwrap_or_else(|| DEFAULT_SIGNAL_ENDPOINTS.iter().map(|s| s.to_string()).collect());
    debug!(count = endpoints.len(), "resolved signal endpoints");
    endpoints
}

/// Effective WebSocket relay endpoints, falling back to [`DEFAULT_PROXY_ENDPOINTS`].
pub fn proxy_endpoints(base_urls: &[String], overrides: &[String]) -> Vec<String> {
    let endpoints = resolve_endpoints(PROXY_PATH, base_urls, overrides)
        .unwrap_or_else(|| DEFAULT_PROXY_ENDPOINTS.iter().map(|s| s.to_string()).collect());
    debug!(count = endpoints.len(), "resolved proxy endpoints");
    endpoints
}
