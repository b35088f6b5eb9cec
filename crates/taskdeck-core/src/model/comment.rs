// ── Comment domain type ──
//
// Comments are fetched per task on demand and never enter a store cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub task_id: EntityId,
    pub user_id: EntityId,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub is_edited: bool,
}
