// ── Project domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::member::MemberRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Unique by email (or by id while partially hydrated); the ingest
    /// path dedupes before anything lands here.
    pub members: Vec<MemberRef>,
    pub task_count: Option<u64>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Page position recorded beside every list snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            pages: 1,
            total: 0,
            limit: 6,
        }
    }
}
