// ── Team store ──
//
// Caches the global member directory. Deletion policy (owner-only, no
// self-deletion) is checked by the caller before dispatch, but
// permission state can change between render and dispatch -- so the
// server's rejection of the same operation flows through the normal
// error path rather than being treated as unreachable.

use std::sync::Arc;

use tokio::sync::watch;

use taskdeck_api::ApiClient;

use crate::convert;
use crate::error::CoreError;
use crate::model::{EntityId, TeamMember};

use super::auth::AuthStore;
use super::lifecycle::ActionState;

/// Snapshot of the team store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamState {
    pub members: Vec<TeamMember>,
    pub fetch: ActionState,
    pub mutate: ActionState,
}

pub struct TeamStore {
    api: Arc<ApiClient>,
    auth: Arc<AuthStore>,
    state: watch::Sender<Arc<TeamState>>,
}

impl TeamStore {
    pub(crate) fn new(api: Arc<ApiClient>, auth: Arc<AuthStore>) -> Self {
        let (state, _) = watch::channel(Arc::new(TeamState::default()));
        Self { api, auth, state }
    }

    // ── Snapshot access ──────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<TeamState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<TeamState>> {
        self.state.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Replace the directory with the server's current membership.
    pub async fn fetch_members(&self) -> Result<(), CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.fetch = ActionState::Pending);

        match self.api.list_members(&token).await {
            Ok(dtos) => {
                let members: Vec<TeamMember> =
                    dtos.into_iter().map(convert::member_from_dto).collect();
                self.update(|s| {
                    s.members = members;
                    s.fetch = ActionState::Fulfilled;
                });
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| {
                    s.members = Vec::new();
                    s.fetch = ActionState::Rejected(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Remove a member. The cached directory only changes on success;
    /// a server-side policy rejection comes back as a normal error.
    pub async fn delete_member(&self, id: &EntityId) -> Result<(), CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.mutate = ActionState::Pending);

        match self.api.delete_member(&token, id.as_str()).await {
            Ok(()) => {
                self.update(|s| {
                    s.members.retain(|m| m.id != *id);
                    s.mutate = ActionState::Fulfilled;
                });
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.mutate = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Evict everything (logout or explicit clear).
    pub fn clear(&self) {
        self.update(|s| *s = TeamState::default());
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn update(&self, f: impl FnOnce(&mut TeamState)) {
        self.state.send_modify(|snap| {
            let mut next = (**snap).clone();
            f(&mut next);
            *snap = Arc::new(next);
        });
    }
}
