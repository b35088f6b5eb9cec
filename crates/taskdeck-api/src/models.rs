// Wire types for the taskdeck backend.
//
// These mirror the JSON the server actually sends (camelCase fields,
// Mongo-style `_id` keys) and stay deliberately loose: statuses are raw
// strings, member references may be bare id strings, and list endpoints
// are inconsistent about envelopes. `taskdeck-core` normalizes all of
// this at ingest; additive server fields are ignored rather than fatal.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `{token, user}` returned by login and signup.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserDto,
}

/// `{user}` envelope returned by the user-info endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct UserInfoResponse {
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

// ── Projects ────────────────────────────────────────────────────────

/// A project member as the server sends it: either a bare id string
/// (not yet populated) or the full `{_id, name, email}` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberRefDto {
    Full(UserDto),
    Id(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<MemberRefDto>,
    #[serde(default)]
    pub task_count: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `{page, pages, total, limit}` pagination block on list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    6
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            page: 1,
            pages: 1,
            total: 0,
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectListResponse {
    #[serde(default)]
    pub data: Vec<ProjectDto>,
    #[serde(default)]
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub member_email: String,
}

/// `{message, project}` returned by the add-member endpoint.
#[derive(Debug, Deserialize)]
pub struct AddMemberResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub project: ProjectDto,
}

// ── Tasks ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignee: Option<MemberRefDto>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Raw status string; the backend's vocabulary is inconsistent, so
    /// normalization happens at the store boundary, not here.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Task list endpoints answer with either a bare array or a `{data: []}`
/// envelope, depending on the route. Decode both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TaskListResponse {
    Plain(Vec<TaskDto>),
    Envelope {
        #[serde(default)]
        data: Vec<TaskDto>,
    },
}

impl TaskListResponse {
    pub(crate) fn into_tasks(self) -> Vec<TaskDto> {
        match self {
            Self::Plain(tasks) | Self::Envelope { data: tasks } => tasks,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub assignee: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// One entry of the batched reorder payload: the task, the column it
/// lands in, and its position within that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOrderPatch {
    pub task_id: String,
    pub status: String,
    pub order: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReorderRequest {
    pub tasks: Vec<TaskOrderPatch>,
}

// ── Team ────────────────────────────────────────────────────────────

/// `{success, data}` envelope on the member directory endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct MemberListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<UserDto>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Comments ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_edited: bool,
}

#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

/// `{comment}` envelope on comment mutations.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponse {
    pub comment: CommentDto,
}

/// `{comments: [...]}` envelope on the per-task comment list.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentListResponse {
    #[serde(default)]
    pub comments: Vec<CommentDto>,
}

// ── Shared envelopes ────────────────────────────────────────────────

/// `{success, message}` acknowledgement returned by delete-style
/// endpoints. `success: false` with a 2xx status still means failure.
#[derive(Debug, Deserialize)]
pub struct Ack {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Error body the backend attaches to 4xx responses:
/// `{message, errors: {field: problem}}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}
