// ── Session and user types ──

use serde::{Deserialize, Serialize};

use super::ids::EntityId;

/// Account role. Unknown role strings from the backend degrade to
/// `Member` -- the less privileged interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Owner,
    Member,
}

impl Role {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("owner") => Self::Owner,
            _ => Self::Member,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// The single active session: the authenticated user plus the opaque
/// bearer token every protected call attaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}
