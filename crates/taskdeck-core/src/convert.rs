// ── API-to-domain conversions ──
//
// Bridges raw `taskdeck_api` wire types into canonical domain types.
// This is the single normalization point: status strings are coerced
// here, member lists are deduplicated here, and nowhere downstream has
// to re-check either invariant.

use std::collections::HashSet;

use taskdeck_api::models::{
    CommentDto, MemberRefDto, PageInfo, ProjectDto, SessionResponse, TaskDto, UserDto,
};

use crate::model::{
    Comment, EntityId, MemberRef, Pagination, Project, Role, Session, Task, TaskStatus,
    TeamMember, User,
};

// ── Users / members ────────────────────────────────────────────────

pub fn user_from_dto(dto: UserDto) -> User {
    User {
        id: EntityId::from(dto.id),
        name: dto.name,
        email: dto.email,
        role: Role::parse(dto.role.as_deref()),
    }
}

pub fn member_from_dto(dto: UserDto) -> TeamMember {
    TeamMember {
        id: EntityId::from(dto.id),
        name: dto.name,
        email: dto.email,
        role: Role::parse(dto.role.as_deref()),
    }
}

pub fn member_ref_from_dto(dto: MemberRefDto) -> MemberRef {
    match dto {
        MemberRefDto::Full(user) => MemberRef::Full(member_from_dto(user)),
        MemberRefDto::Id(id) => MemberRef::Id(EntityId::from(id)),
    }
}

/// Convert and deduplicate a member list: hydrated members are unique
/// by email, bare references by id.
pub fn member_refs_from_dtos(dtos: Vec<MemberRefDto>) -> Vec<MemberRef> {
    let mut seen_emails: HashSet<String> = HashSet::new();
    let mut seen_ids: HashSet<EntityId> = HashSet::new();
    let mut out = Vec::with_capacity(dtos.len());

    for dto in dtos {
        let member = member_ref_from_dto(dto);
        let fresh = match &member {
            MemberRef::Full(m) => {
                seen_emails.insert(m.email.clone()) && seen_ids.insert(m.id.clone())
            }
            MemberRef::Id(id) => seen_ids.insert(id.clone()),
        };
        if fresh {
            out.push(member);
        }
    }

    out
}

// ── Session ────────────────────────────────────────────────────────

pub fn session_from_response(resp: SessionResponse) -> Session {
    Session {
        user: user_from_dto(resp.user),
        token: resp.token,
    }
}

// ── Projects ───────────────────────────────────────────────────────

pub fn project_from_dto(dto: ProjectDto) -> Project {
    Project {
        id: EntityId::from(dto.id),
        name: dto.name,
        description: dto.description,
        members: member_refs_from_dtos(dto.members),
        task_count: dto.task_count,
        updated_at: dto.updated_at,
    }
}

pub fn pagination_from_info(info: PageInfo) -> Pagination {
    Pagination {
        page: info.page,
        pages: info.pages.max(1),
        total: info.total,
        limit: info.limit,
    }
}

// ── Tasks ──────────────────────────────────────────────────────────

pub fn task_from_dto(dto: TaskDto) -> Task {
    Task {
        id: EntityId::from(dto.id),
        project_id: EntityId::from(dto.project_id),
        title: dto.title,
        description: dto.description,
        assignee: dto.assignee.map(member_ref_from_dto),
        due_date: dto.due_date,
        status: TaskStatus::normalize(&dto.status),
        priority: dto
            .priority
            .as_deref()
            .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
                "low" => Some(crate::model::Priority::Low),
                "medium" => Some(crate::model::Priority::Medium),
                "high" => Some(crate::model::Priority::High),
                _ => None,
            }),
        order: dto.order.unwrap_or(0),
    }
}

// ── Comments ───────────────────────────────────────────────────────

pub fn comment_from_dto(dto: CommentDto) -> Comment {
    Comment {
        id: EntityId::from(dto.id),
        task_id: EntityId::from(dto.task_id),
        user_id: EntityId::from(dto.user_id),
        content: dto.content,
        created_at: dto.created_at,
        is_edited: dto.is_edited,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full(id: &str, email: &str) -> MemberRefDto {
        MemberRefDto::Full(UserDto {
            id: id.into(),
            name: format!("user {id}"),
            email: email.into(),
            role: None,
        })
    }

    #[test]
    fn member_dedup_drops_duplicate_emails() {
        let refs = member_refs_from_dtos(vec![
            full("u1", "a@x.com"),
            full("u2", "a@x.com"),
            full("u3", "b@x.com"),
        ]);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].email(), Some("a@x.com"));
        assert_eq!(refs[1].email(), Some("b@x.com"));
    }

    #[test]
    fn member_dedup_drops_duplicate_bare_ids() {
        let refs = member_refs_from_dtos(vec![
            MemberRefDto::Id("u1".into()),
            MemberRefDto::Id("u1".into()),
            full("u1", "a@x.com"),
        ]);
        // The hydrated copy loses to the bare id seen first; a member
        // fetch replaces the whole list anyway.
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn task_status_is_normalized_at_ingest() {
        let dto = TaskDto {
            id: "t1".into(),
            project_id: "p1".into(),
            title: "Fix bug".into(),
            description: String::new(),
            assignee: None,
            due_date: None,
            status: "garbage".into(),
            priority: None,
            order: None,
        };
        let task = task_from_dto(dto);
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.order, 0);
    }
}
