//! Client configuration.
//!
//! The embedding app (mobile bridge, test harness) constructs a
//! [`ClientConfig`] directly or loads it from environment variables.

use serde::{Deserialize, Serialize};

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default per-request timeout in seconds. Image payloads dominate, so
/// this is generous compared to the connect timeout.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User agent sent on every request.
const USER_AGENT: &str = concat!("chroma-client/", env!("CARGO_PKG_VERSION"));

/// Remote service connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote API (e.g. https://api.chroma.app).
    pub base_url: String,
    /// TCP connect timeout (seconds).
    pub connect_timeout_secs: u64,
    /// Whole-request timeout (seconds).
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration pointing at the given base URL, default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Load from environment variables. Returns `None` when
    /// `CHROMA_API_URL` is unset or empty.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("CHROMA_API_URL").ok()?;
        if base_url.is_empty() {
            return None;
        }

        let mut config = Self::new(base_url);
        if let Some(secs) = env_secs("CHROMA_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout_secs = secs;
        }
        if let Some(secs) = env_secs("CHROMA_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = secs;
        }
        Some(config)
    }

    /// The user agent string sent on every request.
    pub fn user_agent(&self) -> &'static str {
        USER_AGENT
    }
}

fn env_secs(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.parse().ok()
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

// ── Tests ────────────────────────────────────────────────────────
