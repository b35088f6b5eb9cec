// ── Team member types ──
//
// Two distinct notions, kept explicit: `TeamMember` is an entry in the
// global directory; `MemberRef` is how a project (or task assignee)
// points at one, possibly before a member-fetch resolved it.

use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::session::Role;

/// Entry in the global member directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Reference to a team member from a project or task.
///
/// The backend populates these lazily: list responses may carry bare
/// ids, and a later member fetch hydrates them into full records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberRef {
    Full(TeamMember),
    Id(EntityId),
}

impl MemberRef {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Full(member) => &member.id,
            Self::Id(id) => id,
        }
    }

    /// The member's email, when hydrated.
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Full(member) => Some(&member.email),
            Self::Id(_) => None,
        }
    }

    /// The member's display name, when hydrated.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Full(member) => Some(&member.name),
            Self::Id(_) => None,
        }
    }

    pub fn is_hydrated(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}
