//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use taskdeck_core::CoreError;

/// Exit codes per the CLI contract.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Not logged in")]
    #[diagnostic(
        code(taskdeck::auth_required),
        help("Run: taskdeck login")
    )]
    AuthRequired,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(taskdeck::auth_failed),
        help("Check your email and password, then run: taskdeck login")
    )]
    AuthFailed { message: String },

    // ── Permissions ──────────────────────────────────────────────────
    #[error("Not permitted: {reason}")]
    #[diagnostic(code(taskdeck::permission))]
    Permission { reason: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(taskdeck::validation))]
    Validation { message: String },

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(taskdeck::usage))]
    Usage { field: String, reason: String },

    // ── Entity state ─────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(code(taskdeck::not_found))]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    #[diagnostic(
        code(taskdeck::conflict),
        help("The entity changed on the server; refetch and retry.")
    )]
    Conflict { message: String },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Cannot reach server: {reason}")]
    #[diagnostic(
        code(taskdeck::connection_failed),
        help("Check that the backend is running and the server URL is correct.\nTry: taskdeck config show")
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(code(taskdeck::timeout), help("The server is slow or unreachable; try again."))]
    Timeout,

    // ── Everything else ──────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(taskdeck::core))]
    Core(CoreError),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(taskdeck::config))]
    Config(#[from] taskdeck_config::ConfigError),

    #[error("{0}")]
    #[diagnostic(code(taskdeck::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthRequired | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Permission { .. } => exit_code::PERMISSION,
            Self::Usage { .. } => exit_code::USAGE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthRequired => Self::AuthRequired,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Validation {
                message,
                field_errors,
            } => {
                let mut lines = vec![message];
                for (field, problem) in &field_errors {
                    lines.push(format!("  {field}: {problem}"));
                }
                Self::Validation {
                    message: lines.join("\n"),
                }
            }
            CoreError::NotFound { message } => Self::NotFound { message },
            CoreError::Conflict { message } => Self::Conflict { message },
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },
            CoreError::Timeout { .. } => Self::Timeout,
            other => Self::Core(other),
        }
    }
}
