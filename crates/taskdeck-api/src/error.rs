use std::collections::BTreeMap;

use thiserror::Error;

/// Top-level error type for the `taskdeck-api` crate.
///
/// Covers every failure mode of a backend call: authentication,
/// validation, missing/conflicting entities, transport, and decoding.
/// `taskdeck-core` maps these into user-facing diagnostics; nothing
/// here escapes as an uncaught panic.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the request's credentials (401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Request rejection ───────────────────────────────────────────
    /// Validation failure (4xx) with optional per-field detail.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        /// Field name -> human-readable problem, as reported by the server.
        field_errors: BTreeMap<String, String>,
    },

    /// The addressed entity does not exist (404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The entity was concurrently mutated or already exists (409).
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The server answered 2xx but flagged the operation as failed
    /// (`{success: false}` acknowledgement envelope).
    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    /// Any other non-2xx response.
    #[error("API error (HTTP {status}): {message}")]
    Api { message: String, status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded its deadline.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is invalid and the
    /// user should log in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }

    /// The HTTP status code behind this error, if one applies.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Per-field validation detail, when the server provided it.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }
}
