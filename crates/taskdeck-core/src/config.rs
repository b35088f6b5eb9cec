// ── Runtime client configuration ──
//
// Describes *how* to reach the backend. Built by the CLI (or a test)
// and handed to `Workspace::new` -- core never reads config files.

use std::time::Duration;

use url::Url;

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., `http://localhost:5000`).
    pub base_url: Url,
    /// Client-wide timeout for mutations.
    pub timeout: Duration,
    /// Per-request deadline for list-style reads.
    pub read_timeout: Duration,
    /// Page size requested from paginated list endpoints.
    pub page_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:5000").expect("static URL"),
            timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(10),
            page_limit: 6,
        }
    }
}
