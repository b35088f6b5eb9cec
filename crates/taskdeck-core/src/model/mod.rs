// ── Domain model ──
//
// Canonical types the stores cache and the views render. Everything
// here is already normalized: statuses are one of three values, member
// lists carry no duplicate emails, ids are opaque strings.

mod comment;
mod ids;
mod member;
mod project;
mod session;
mod task;

pub use comment::Comment;
pub use ids::EntityId;
pub use member::{MemberRef, TeamMember};
pub use project::{Pagination, Project};
pub use session::{Role, Session, User};
pub use task::{DueBucket, Priority, Task, TaskStatus};
