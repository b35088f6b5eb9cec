// ── Auth store ──
//
// Owns the single active session. Login/signup persist it through the
// injected `SessionStore`; logout clears both memory and durable
// storage. Every other store asks this one for the token and fails
// fast client-side when there is none.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use taskdeck_api::ApiClient;

use crate::convert;
use crate::error::CoreError;
use crate::model::{Session, User};
use crate::session::SessionStore;

use super::lifecycle::ActionState;

/// Snapshot of the auth store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub phase: ActionState,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

pub struct AuthStore {
    api: Arc<ApiClient>,
    sessions: Arc<dyn SessionStore>,
    state: watch::Sender<Arc<AuthState>>,
}

impl AuthStore {
    pub(crate) fn new(api: Arc<ApiClient>, sessions: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(Arc::new(AuthState::default()));
        Self {
            api,
            sessions,
            state,
        }
    }

    // ── Snapshot access ──────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<AuthState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<AuthState>> {
        self.state.subscribe()
    }

    /// The active bearer token, or [`CoreError::AuthRequired`] when no
    /// session exists. Protected calls check this before touching the
    /// network so the missing-token case never depends on a 401.
    pub fn token(&self) -> Result<String, CoreError> {
        self.state
            .borrow()
            .session
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(CoreError::AuthRequired)
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Restore a previously persisted session. Returns `true` if one
    /// was found.
    pub fn restore(&self) -> Result<bool, CoreError> {
        let restored = self.sessions.load()?;
        let found = restored.is_some();
        if let Some(session) = restored {
            debug!(user = %session.user.email, "session restored");
            self.update(|s| s.session = Some(session));
        }
        Ok(found)
    }

    /// Authenticate and persist the resulting session.
    pub async fn login(&self, email: &str, password: SecretString) -> Result<Session, CoreError> {
        self.update(|s| s.phase = ActionState::Pending);

        match self.api.login(email, &password).await {
            Ok(resp) => {
                let session = convert::session_from_response(resp);
                self.persist(&session);
                self.update(|s| {
                    s.session = Some(session.clone());
                    s.phase = ActionState::Fulfilled;
                });
                Ok(session)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.phase = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Register a new account and persist the resulting session.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: SecretString,
    ) -> Result<Session, CoreError> {
        self.update(|s| s.phase = ActionState::Pending);

        match self.api.signup(name, email, &password).await {
            Ok(resp) => {
                let session = convert::session_from_response(resp);
                self.persist(&session);
                self.update(|s| {
                    s.session = Some(session.clone());
                    s.phase = ActionState::Fulfilled;
                });
                Ok(session)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.phase = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Refresh the cached profile using the existing token.
    pub async fn fetch_user_info(&self) -> Result<User, CoreError> {
        let token = self.token()?;

        match self.api.user_info(&token).await {
            Ok(dto) => {
                let user = convert::user_from_dto(dto);
                let mut refreshed = None;
                self.update(|s| {
                    if let Some(session) = s.session.as_mut() {
                        session.user = user.clone();
                        refreshed = Some(session.clone());
                    }
                });
                if let Some(session) = refreshed {
                    self.persist(&session);
                }
                Ok(user)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.phase = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Drop the session from memory and durable storage.
    ///
    /// Storage failures are non-fatal: the in-memory session is gone
    /// either way, and a stale file only means a surprise restore next
    /// launch.
    pub fn logout(&self) {
        if let Err(e) = self.sessions.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
        self.update(|s| {
            s.session = None;
            s.phase = ActionState::Idle;
        });
        debug!("logged out");
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn persist(&self, session: &Session) {
        if let Err(e) = self.sessions.save(session) {
            warn!(error = %e, "failed to persist session");
        }
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        self.state.send_modify(|snap| {
            let mut next = (**snap).clone();
            f(&mut next);
            *snap = Arc::new(next);
        });
    }
}
