// ── Workspace container ──
//
// The injectable state container wiring the API client, the four
// entity stores, and the notice channel together. No singletons: every
// consumer (the CLI, each test) builds its own instance, so tests run
// against isolated state and a mock server without any global setup.

use std::sync::Arc;

use tokio::sync::broadcast;

use taskdeck_api::ApiClient;
use taskdeck_api::transport::TransportConfig;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::session::SessionStore;
use crate::store::{AuthStore, ProjectsStore, TasksStore, TeamStore};

const NOTICE_CHANNEL_SIZE: usize = 64;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-facing notification emitted by a store (reorder confirmed,
/// rollback happened, ...). The view layer decides how to show it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// One client session's worth of state: API client, stores, notices.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct Workspace {
    inner: Arc<WorkspaceInner>,
}

struct WorkspaceInner {
    auth: Arc<AuthStore>,
    projects: ProjectsStore,
    tasks: TasksStore,
    team: TeamStore,
    notices: broadcast::Sender<Notice>,
}

impl Workspace {
    /// Build a workspace from configuration and a session store.
    ///
    /// Restores a persisted session if one exists; callers that want a
    /// clean slate pass a fresh [`MemorySessionStore`](crate::MemorySessionStore).
    pub fn new(
        config: &ClientConfig,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            read_timeout: config.read_timeout,
        };
        let api = Arc::new(ApiClient::new(config.base_url.clone(), &transport)?);

        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_SIZE);
        let auth = Arc::new(AuthStore::new(Arc::clone(&api), sessions));
        auth.restore()?;

        let projects = ProjectsStore::new(Arc::clone(&api), Arc::clone(&auth), config.page_limit);
        let tasks = TasksStore::new(Arc::clone(&api), Arc::clone(&auth), notices.clone());
        let team = TeamStore::new(Arc::clone(&api), Arc::clone(&auth));

        Ok(Self {
            inner: Arc::new(WorkspaceInner {
                auth,
                projects,
                tasks,
                team,
                notices,
            }),
        })
    }

    // ── Store accessors ──────────────────────────────────────────────

    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    pub fn projects(&self) -> &ProjectsStore {
        &self.inner.projects
    }

    pub fn tasks(&self) -> &TasksStore {
        &self.inner.tasks
    }

    pub fn team(&self) -> &TeamStore {
        &self.inner.team
    }

    /// Subscribe to user-facing notices.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Log out: clear the session (memory + durable storage) and evict
    /// every cached entity. Cached entities never survive the session
    /// that fetched them.
    pub fn logout(&self) {
        self.inner.auth.logout();
        self.inner.projects.clear();
        self.inner.tasks.clear();
        self.inner.team.clear();
    }
}
