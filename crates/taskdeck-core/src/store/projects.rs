// ── Projects store ──
//
// Caches one page of the project list plus a "current project" pointer.
// Fetches replace the snapshot wholesale; mutations apply the server's
// response and, where the server computes side effects (task counts,
// membership), refetch the authoritative page rather than guessing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use taskdeck_api::ApiClient;
use taskdeck_api::models::{CreateProjectRequest, UpdateProjectRequest};

use crate::convert;
use crate::error::CoreError;
use crate::model::{EntityId, MemberRef, Pagination, Project};

use super::auth::AuthStore;
use super::lifecycle::ActionState;

/// Snapshot of the projects store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsState {
    /// The current page of projects, in server order.
    pub list: Vec<Project>,
    /// The project the UI is focused on, if any.
    pub current: Option<Project>,
    pub pagination: Pagination,
    pub fetch: ActionState,
    pub create: ActionState,
    pub mutate: ActionState,
}

/// Payload for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    /// Member emails; duplicates are dropped before dispatch.
    pub members: Vec<String>,
}

/// Partial update for a project. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub members: Option<Vec<String>>,
}

pub struct ProjectsStore {
    api: Arc<ApiClient>,
    auth: Arc<AuthStore>,
    state: watch::Sender<Arc<ProjectsState>>,
    /// Bumped on every fetch dispatch; a completion whose generation is
    /// no longer current is superseded and must not apply.
    fetch_gen: AtomicU64,
    page_limit: u32,
}

impl ProjectsStore {
    pub(crate) fn new(api: Arc<ApiClient>, auth: Arc<AuthStore>, page_limit: u32) -> Self {
        let (state, _) = watch::channel(Arc::new(ProjectsState::default()));
        Self {
            api,
            auth,
            state,
            fetch_gen: AtomicU64::new(0),
            page_limit,
        }
    }

    // ── Snapshot access ──────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<ProjectsState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ProjectsState>> {
        self.state.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Replace the list snapshot with the requested page.
    ///
    /// Completions apply in completion order: a response belonging to a
    /// superseded dispatch is discarded instead of clobbering newer
    /// data. A page past the end yields an empty list but leaves the
    /// recorded pagination at the last valid boundary.
    pub async fn fetch(&self, page: Option<u32>) -> Result<(), CoreError> {
        let token = self.auth.token()?;
        let page = page.unwrap_or_else(|| self.state.borrow().pagination.page);
        let generation = self.fetch_gen.fetch_add(1, Ordering::SeqCst) + 1;

        self.update(|s| s.fetch = ActionState::Pending);

        let result = self.api.list_projects(&token, page, self.page_limit).await;

        if self.fetch_gen.load(Ordering::SeqCst) != generation {
            debug!(page, "discarding superseded project fetch");
            return Ok(());
        }

        match result {
            Ok(resp) => {
                let projects: Vec<Project> =
                    resp.data.into_iter().map(convert::project_from_dto).collect();
                let pagination = convert::pagination_from_info(resp.pagination);
                let out_of_bounds = projects.is_empty() && page > pagination.pages;

                self.update(|s| {
                    s.list = projects;
                    if !out_of_bounds {
                        s.pagination = pagination;
                    }
                    s.fetch = ActionState::Fulfilled;
                });
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                // A failed fetch must not leave stale data looking live.
                self.update(|s| {
                    s.list = Vec::new();
                    s.fetch = ActionState::Rejected(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Create a project, then refetch the authoritative page so
    /// server-computed fields (task counts, membership) are correct.
    pub async fn create(&self, new: NewProject) -> Result<Project, CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.create = ActionState::Pending);

        let mut members = new.members;
        members.sort();
        members.dedup();

        let req = CreateProjectRequest {
            name: new.name,
            description: new.description,
            members,
        };

        match self.api.create_project(&token, &req).await {
            Ok(dto) => {
                let project = convert::project_from_dto(dto);
                self.update(|s| {
                    // Prepend, dropping any copy the page already holds
                    // so the refetch below cannot double it up.
                    s.list.retain(|p| p.id != project.id);
                    s.list.insert(0, project.clone());
                    s.current = Some(project.clone());
                    s.create = ActionState::Fulfilled;
                });

                if let Err(e) = self.fetch(None).await {
                    debug!(error = %e, "post-create refetch failed");
                }
                Ok(project)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.create = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Update a project in place. No partial apply: on failure the
    /// cached copy is left exactly as it was.
    pub async fn update_project(
        &self,
        id: &EntityId,
        changes: ProjectChanges,
    ) -> Result<Project, CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.mutate = ActionState::Pending);

        let req = UpdateProjectRequest {
            name: changes.name,
            description: changes.description,
            members: changes.members,
        };

        match self.api.update_project(&token, id.as_str(), &req).await {
            Ok(dto) => {
                let project = convert::project_from_dto(dto);
                self.update(|s| {
                    s.replace(&project);
                    s.mutate = ActionState::Fulfilled;
                });
                Ok(project)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.mutate = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Delete a project. The cached list only changes on success.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.mutate = ActionState::Pending);

        match self.api.delete_project(&token, id.as_str()).await {
            Ok(()) => {
                self.update(|s| {
                    s.list.retain(|p| p.id != *id);
                    if s.current.as_ref().is_some_and(|c| c.id == *id) {
                        s.current = None;
                    }
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

    /// Add a member by email; the server answers with the updated
    /// project, which replaces the cached copy.
    pub async fn add_member(&self, id: &EntityId, email: &str) -> Result<Project, CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.mutate = ActionState::Pending);

        match self.api.add_member(&token, id.as_str(), email).await {
            Ok(resp) => {
                let project = convert::project_from_dto(resp.project);
                self.update(|s| {
                    s.replace(&project);
                    s.mutate = ActionState::Fulfilled;
                });
                Ok(project)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.mutate = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Hydrate a project's member references into full records.
    pub async fn fetch_members(&self, id: &EntityId) -> Result<Vec<MemberRef>, CoreError> {
        let token = self.auth.token()?;

        match self.api.project_members(&token, id.as_str()).await {
            Ok(dtos) => {
                let members = convert::member_refs_from_dtos(dtos);
                self.update(|s| {
                    if let Some(project) = s.list.iter_mut().find(|p| p.id == *id) {
                        project.members = members.clone();
                    }
                    if let Some(current) = s.current.as_mut() {
                        if current.id == *id {
                            current.members = members.clone();
                        }
                    }
                });
                Ok(members)
            }
            Err(err) => Err(CoreError::from(err)),
        }
    }

    /// Point the "current project" at a cached entry.
    pub fn set_current(&self, id: Option<&EntityId>) {
        self.update(|s| {
            s.current = id.and_then(|id| s.list.iter().find(|p| p.id == *id).cloned());
        });
    }

    /// Evict everything (logout or explicit clear).
    pub fn clear(&self) {
        self.update(|s| *s = ProjectsState::default());
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn update(&self, f: impl FnOnce(&mut ProjectsState)) {
        self.state.send_modify(|snap| {
            let mut next = (**snap).clone();
            f(&mut next);
            *snap = Arc::new(next);
        });
    }
}

impl ProjectsState {
    /// Replace a project in the list and the `current` pointer.
    fn replace(&mut self, project: &Project) {
        if let Some(slot) = self.list.iter_mut().find(|p| p.id == project.id) {
            *slot = project.clone();
        }
        if self.current.as_ref().is_some_and(|c| c.id == project.id) {
            self.current = Some(project.clone());
        }
    }
}
