// ── Durable session storage contract ──
//
// Core defines the contract and an in-memory implementation; the disk
// implementation (two keys, `token` and `user`, under the platform data
// dir) lives in taskdeck-config. Core never touches the filesystem.

use std::sync::Mutex;

use crate::error::CoreError;
use crate::model::Session;

/// Persists the active session across process restarts.
///
/// Implementations store exactly two keys -- the opaque token and the
/// serialized user profile -- and must treat `clear` as idempotent.
pub trait SessionStore: Send + Sync {
    /// Persist the session, replacing any previous one.
    fn save(&self, session: &Session) -> Result<(), CoreError>;

    /// Load the persisted session, if one exists.
    fn load(&self) -> Result<Option<Session>, CoreError>;

    /// Remove any persisted session.
    fn clear(&self) -> Result<(), CoreError>;
}

/// In-memory session store. Default for tests and for callers that opt
/// out of persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), CoreError> {
        *self.session.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, CoreError> {
        Ok(self.session.lock().map_err(poisoned)?.clone())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.session.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> CoreError {
    CoreError::Storage {
        message: "session store lock poisoned".into(),
    }
}
