// ── Tasks store ──
//
// Caches the task list for the active scope (one project or all) and
// runs the optimistic board coordinator. The snapshot carries two named
// lists: `confirmed` (last server-acknowledged) and `working` (the
// speculative copy of an in-flight drag). Views render `visible()`;
// fetches landing mid-drag update `confirmed` only, so they can never
// overwrite a gesture in progress.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use taskdeck_api::ApiClient;
use taskdeck_api::models::{CreateTaskRequest, TaskOrderPatch, UpdateTaskRequest};

use crate::convert;
use crate::error::CoreError;
use crate::model::{Comment, EntityId, Priority, Task, TaskStatus};
use crate::workspace::{Notice, NoticeLevel};

use super::auth::AuthStore;
use super::board::{self, MovePlan};
use super::lifecycle::ActionState;

/// Snapshot of the tasks store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksState {
    /// Last server-acknowledged task list.
    pub confirmed: Vec<Task>,
    /// Speculative copy of an in-flight drag, if any.
    pub working: Option<Vec<Task>>,
    /// Project the list was fetched for; `None` after `fetch_all`.
    pub scope: Option<EntityId>,
    pub fetch: ActionState,
    pub create: ActionState,
    pub mutate: ActionState,
    pub reorder: ActionState,
}

impl TasksState {
    /// The list views should render: the optimistic working copy while
    /// a drag is in flight, the confirmed snapshot otherwise.
    pub fn visible(&self) -> &[Task] {
        self.working.as_deref().unwrap_or(&self.confirmed)
    }
}

/// Payload for creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: EntityId,
    pub title: String,
    pub description: String,
    pub assignee: Option<EntityId>,
    pub due_date: Option<DateTime<Utc>>,
    /// Defaults to `To Do` when unset.
    pub status: Option<TaskStatus>,
}

/// Partial update for a task. Outer `None` leaves the field untouched;
/// the nested options can clear the assignee or due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<Option<EntityId>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

/// A board drop: move the task into `dest_status` at `dest_index`.
#[derive(Debug, Clone)]
pub struct MoveTask {
    pub task_id: EntityId,
    pub dest_status: TaskStatus,
    pub dest_index: usize,
}

pub struct TasksStore {
    api: Arc<ApiClient>,
    auth: Arc<AuthStore>,
    state: watch::Sender<Arc<TasksState>>,
    /// Bumped on every fetch dispatch; superseded completions discard.
    fetch_gen: AtomicU64,
    /// Bumped on every drag gesture; a completing reorder only touches
    /// the working copy if no newer gesture replaced it.
    drag_gen: AtomicU64,
    notices: broadcast::Sender<Notice>,
}

impl TasksStore {
    pub(crate) fn new(
        api: Arc<ApiClient>,
        auth: Arc<AuthStore>,
        notices: broadcast::Sender<Notice>,
    ) -> Self {
        let (state, _) = watch::channel(Arc::new(TasksState::default()));
        Self {
            api,
            auth,
            state,
            fetch_gen: AtomicU64::new(0),
            drag_gen: AtomicU64::new(0),
            notices,
        }
    }

    // ── Snapshot access ──────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<TasksState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<TasksState>> {
        self.state.subscribe()
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Replace the confirmed list with one project's tasks.
    pub async fn fetch_for_project(&self, project_id: &EntityId) -> Result<(), CoreError> {
        let token = self.auth.token()?;
        let generation = self.fetch_gen.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|s| s.fetch = ActionState::Pending);

        let result = self.api.list_project_tasks(&token, project_id.as_str()).await;
        self.apply_fetch(generation, Some(project_id.clone()), result)
    }

    /// Replace the confirmed list with every task visible to the user.
    pub async fn fetch_all(&self) -> Result<(), CoreError> {
        let token = self.auth.token()?;
        let generation = self.fetch_gen.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|s| s.fetch = ActionState::Pending);

        let result = self.api.list_all_tasks(&token).await;
        self.apply_fetch(generation, None, result)
    }

    fn apply_fetch(
        &self,
        generation: u64,
        scope: Option<EntityId>,
        result: Result<Vec<taskdeck_api::models::TaskDto>, taskdeck_api::Error>,
    ) -> Result<(), CoreError> {
        if self.fetch_gen.load(Ordering::SeqCst) != generation {
            debug!("discarding superseded task fetch");
            return Ok(());
        }

        match result {
            Ok(dtos) => {
                let tasks: Vec<Task> = dtos.into_iter().map(convert::task_from_dto).collect();
                self.update(|s| {
                    s.confirmed = tasks;
                    s.scope = scope;
                    s.fetch = ActionState::Fulfilled;
                    // `working` is deliberately left alone: an in-flight
                    // drag owns the visible list until it settles.
                });
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| {
                    s.confirmed = Vec::new();
                    s.scope = None;
                    s.fetch = ActionState::Rejected(err.to_string());
                });
                Err(err)
            }
        }
    }

    // ── CRUD ─────────────────────────────────────────────────────────

    /// Create a task. Defaults: status `To Do`, no assignee.
    pub async fn create(&self, new: NewTask) -> Result<Task, CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.create = ActionState::Pending);

        let status = new.status.unwrap_or(TaskStatus::ToDo);
        let req = CreateTaskRequest {
            project_id: new.project_id.to_string(),
            title: new.title.trim().to_owned(),
            description: new.description.trim().to_owned(),
            assignee: new.assignee.map(|id| id.to_string()),
            due_date: new.due_date,
            status: status.as_wire().to_owned(),
        };

        match self.api.create_task(&token, &req).await {
            Ok(dto) => {
                let task = convert::task_from_dto(dto);
                self.update(|s| {
                    s.confirmed.retain(|t| t.id != task.id);
                    s.confirmed.push(task.clone());
                    s.create = ActionState::Fulfilled;
                });
                Ok(task)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.create = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Update a task in place. On failure the cached copy is untouched.
    pub async fn update_task(
        &self,
        id: &EntityId,
        changes: TaskChanges,
    ) -> Result<Task, CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.mutate = ActionState::Pending);

        let req = UpdateTaskRequest {
            title: changes.title,
            description: changes.description,
            assignee: changes.assignee.map(|a| a.map(|id| id.to_string())),
            due_date: changes.due_date,
            status: changes.status.map(|s| s.as_wire().to_owned()),
            priority: changes.priority.map(|p| p.to_string()),
        };

        match self.api.update_task(&token, id.as_str(), &req).await {
            Ok(dto) => {
                let task = convert::task_from_dto(dto);
                self.update(|s| {
                    if let Some(slot) = s.confirmed.iter_mut().find(|t| t.id == task.id) {
                        *slot = task.clone();
                    }
                    s.mutate = ActionState::Fulfilled;
                });
                Ok(task)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.update(|s| s.mutate = ActionState::Rejected(err.to_string()));
                Err(err)
            }
        }
    }

    /// Delete a task. The cached list only changes on success.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let token = self.auth.token()?;
        self.update(|s| s.mutate = ActionState::Pending);

        match self.api.delete_task(&token, id.as_str()).await {
            Ok(()) => {
                self.update(|s| {
                    s.confirmed.retain(|t| t.id != *id);
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

    // ── Optimistic board moves ───────────────────────────────────────

    /// Handle a board drop: apply the new ordering locally, fire one
    /// batched reorder for the whole destination column, and reconcile
    /// or roll back on completion.
    ///
    /// Returns `Ok(false)` when the drop was a no-op (same position, or
    /// no valid target) -- no state change, no network call. A second
    /// drag started before this one resolves is not blocked; the two
    /// batched writes race at the server and the later one wins there.
    pub async fn move_task(&self, request: MoveTask) -> Result<bool, CoreError> {
        let token = self.auth.token()?;

        let plan = {
            let snapshot = self.state.borrow();
            board::plan_move(
                &snapshot.confirmed,
                &request.task_id,
                request.dest_status,
                request.dest_index,
            )
        };
        let Some(plan) = plan else {
            debug!(task = %request.task_id, "board drop is a no-op");
            return Ok(false);
        };

        let gesture = self.drag_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let MovePlan { tasks, patches } = plan;

        // Optimistic apply: the working copy becomes the visible list
        // while the write is in flight.
        self.update(|s| {
            s.working = Some(tasks.clone());
            s.reorder = ActionState::Pending;
        });

        let wire_patches: Vec<TaskOrderPatch> = patches
            .into_iter()
            .map(|p| TaskOrderPatch {
                task_id: p.task_id.to_string(),
                status: p.status.as_wire().to_owned(),
                order: p.order,
            })
            .collect();

        match self.api.reorder_tasks(&token, wire_patches).await {
            Ok(()) => {
                let latest_gesture = self.drag_gen.load(Ordering::SeqCst) == gesture;
                self.update(|s| {
                    // The acknowledged ordering is now the confirmed
                    // snapshot, whatever fetches landed meanwhile.
                    s.confirmed = tasks;
                    if latest_gesture {
                        s.working = None;
                    }
                    s.reorder = ActionState::Fulfilled;
                });
                self.notify(NoticeLevel::Success, "Task order updated");
                Ok(true)
            }
            Err(err) => {
                let err = CoreError::from(err);
                let latest_gesture = self.drag_gen.load(Ordering::SeqCst) == gesture;
                self.update(|s| {
                    // Unconditional rollback: drop the speculative copy
                    // and fall back to whatever is confirmed *now*. A
                    // fetch that completed mid-flight stays intact.
                    if latest_gesture {
                        s.working = None;
                    }
                    s.reorder = ActionState::Rejected(err.to_string());
                });
                warn!(error = %err, "reorder failed, reverted to confirmed order");
                self.notify(NoticeLevel::Error, &format!("Could not move task: {err}"));
                Err(err)
            }
        }
    }

    // ── Comments (pass-through, no caching) ──────────────────────────

    /// Fetch the comments on a task.
    pub async fn comments(&self, task_id: &EntityId) -> Result<Vec<Comment>, CoreError> {
        let token = self.auth.token()?;
        let dtos = self.api.list_comments(&token, task_id.as_str()).await?;
        Ok(dtos.into_iter().map(convert::comment_from_dto).collect())
    }

    /// Add a comment to a task.
    pub async fn add_comment(
        &self,
        task_id: &EntityId,
        content: &str,
    ) -> Result<Comment, CoreError> {
        let token = self.auth.token()?;
        let dto = self
            .api
            .create_comment(&token, task_id.as_str(), content)
            .await?;
        Ok(convert::comment_from_dto(dto))
    }

    /// Best-effort comment count for list badges. Never errors -- a
    /// failed prefetch just means no badge.
    pub async fn comment_count(&self, task_id: &EntityId) -> Option<usize> {
        let token = self.auth.token().ok()?;
        self.api
            .list_comments(&token, task_id.as_str())
            .await
            .map(|comments| comments.len())
            .ok()
    }

    // ── Eviction ─────────────────────────────────────────────────────

    pub fn clear(&self) {
        self.update(|s| *s = TasksState::default());
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn update(&self, f: impl FnOnce(&mut TasksState)) {
        self.state.send_modify(|snap| {
            let mut next = (**snap).clone();
            f(&mut next);
            *snap = Arc::new(next);
        });
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        let _ = self.notices.send(Notice {
            level,
            message: message.to_owned(),
        });
    }
}
