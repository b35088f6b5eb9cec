// ── Entity stores ──
//
// One store per entity family (auth, projects, tasks, team). Each owns
// a snapshot broadcast over a `watch` channel and mutates it only
// through its own reducer helpers in response to completed actions --
// views read snapshots and dispatch actions, never write.

mod auth;
mod board;
mod lifecycle;
mod projects;
mod tasks;
mod team;

pub use auth::{AuthState, AuthStore};
pub use lifecycle::ActionState;
pub use projects::{NewProject, ProjectChanges, ProjectsState, ProjectsStore};
pub use tasks::{MoveTask, NewTask, TaskChanges, TasksState, TasksStore};
pub use team::{TeamState, TeamStore};
