// Shared transport configuration for building reqwest::Client instances.
//
// The one HTTP client is reused across every endpoint family; list-style
// reads get a tighter per-request deadline on top of the client-wide
// timeout (the backend can be slow to page large collections, but a read
// that takes longer than ~10s is treated as failed).

use std::time::Duration;

/// Shared transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Client-wide timeout, applied to mutations.
    pub timeout: Duration,
    /// Per-request deadline for list-style reads.
    pub read_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
