// Backend HTTP client
//
// Wraps `reqwest::Client` with taskdeck-specific URL construction,
// bearer-token attachment, and HTTP-status-to-error translation. All
// endpoint families (auth, projects, tasks, team, comments) are
// implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Ack, ErrorBody};
use crate::transport::TransportConfig;

/// Raw HTTP client for the taskdeck backend.
///
/// Attaches the caller's bearer token per request (the client itself is
/// session-agnostic, so one instance serves every store), translates
/// non-2xx responses into typed [`Error`] values, and never panics on a
/// malformed body.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: std::time::Duration,
    read_timeout: std::time::Duration,
}

impl ApiClient {
    /// Create a new client from a base URL and a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
            read_timeout: transport.read_timeout,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        let defaults = TransportConfig::default();
        Self {
            http,
            base_url,
            timeout: defaults.timeout,
            read_timeout: defaults.read_timeout,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path (e.g. `api/tasks/project/42`).
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request under the bounded read deadline.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let mut req = self.http.get(url).timeout(self.read_timeout);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| map_send_error(e, self.read_timeout))?;
        parse_response(resp).await
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
        token: Option<&str>,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let mut req = self.http.post(url).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;
        parse_response(resp).await
    }

    /// Send a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
        token: Option<&str>,
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let mut req = self.http.put(url).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;
        parse_response(resp).await
    }

    /// Send a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<T, Error> {
        debug!("DELETE {}", url);

        let mut req = self.http.delete(url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;
        parse_response(resp).await
    }

    /// Decode a `{success, message}` acknowledgement, converting
    /// `success: false` into [`Error::Rejected`].
    pub(crate) fn check_ack(ack: Ack) -> Result<Ack, Error> {
        if ack.success {
            Ok(ack)
        } else {
            Err(Error::Rejected {
                message: ack
                    .message
                    .unwrap_or_else(|| "operation rejected by server".into()),
            })
        }
    }
}

/// Map a `reqwest` send error, surfacing timeouts explicitly.
fn map_send_error(err: reqwest::Error, deadline: std::time::Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            timeout_secs: deadline.as_secs(),
        }
    } else {
        Error::Transport(err)
    }
}

/// Translate the response status and decode the body.
///
/// Non-2xx responses are read for the backend's `{message, errors}`
/// error body so validation failures keep their field-level detail.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        let detail: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        let message = detail
            .message
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        return Err(match status.as_u16() {
            401 => Error::Authentication { message },
            404 => Error::NotFound { message },
            409 => Error::Conflict { message },
            code if (400..500).contains(&code) => Error::Validation {
                message,
                field_errors: detail.errors,
            },
            code => Error::Api {
                message,
                status: code,
            },
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
