// ── Core error types ──
//
// User-facing errors from taskdeck-core. Consumers never see raw
// reqwest failures or JSON parse noise -- the `From<taskdeck_api::Error>`
// impl translates transport-layer errors into domain-appropriate
// variants whose `Display` output is fit for a toast or an inline
// message.

use std::collections::BTreeMap;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    /// No session token is present. Raised client-side before any
    /// network call so the UI can show a dedicated "please log in"
    /// message instead of waiting on the server's 401.
    #[error("Not logged in -- please log in to continue")]
    AuthRequired,

    /// The server rejected the session (invalid or expired token).
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Request rejection ────────────────────────────────────────────
    /// Validation failure with optional per-field detail for forms.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The entity was mutated concurrently or already exists.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The server answered but flagged the operation as failed.
    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Request timed out after {timeout_secs}s -- try again")]
    Timeout { timeout_secs: u64 },

    #[error("Cannot reach server: {reason}")]
    ConnectionFailed { reason: String },

    /// Any other server-side failure (5xx and friends). Retryable from
    /// the user's point of view.
    #[error("Server error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Local ────────────────────────────────────────────────────────
    /// Durable session storage failed (read or write).
    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` when the fix is logging in again.
    pub fn needs_login(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::AuthenticationFailed { .. })
    }

    /// Per-field validation detail for form display, if any.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<taskdeck_api::Error> for CoreError {
    fn from(err: taskdeck_api::Error) -> Self {
        match err {
            taskdeck_api::Error::Authentication { message } => {
                Self::AuthenticationFailed { message }
            }
            taskdeck_api::Error::Validation {
                message,
                field_errors,
            } => Self::Validation {
                message,
                field_errors,
            },
            taskdeck_api::Error::NotFound { message } => Self::NotFound { message },
            taskdeck_api::Error::Conflict { message } => Self::Conflict { message },
            taskdeck_api::Error::Rejected { message } => Self::Rejected { message },
            taskdeck_api::Error::Api { message, status } => Self::Api {
                message,
                status: Some(status),
            },
            taskdeck_api::Error::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            taskdeck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    Self::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            taskdeck_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            taskdeck_api::Error::Deserialization { message, body: _ } => {
                Self::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
