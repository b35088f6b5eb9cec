// ── Derived views ──
//
// Pure, synchronous functions over a store snapshot. Nothing here is
// cached: filters and aggregates are recomputed whenever the snapshot
// or the criteria change, so they can never drift out of sync.

mod analytics;
mod filter;

pub use analytics::{StatusCounts, project_task_counts, status_counts};
pub use filter::{AssigneeFilter, TaskFilter, due_bucket_of, filter_tasks};

use crate::model::{EntityId, Task, TaskStatus};

/// The tasks of one (project, status) board column, sorted by `order`.
///
/// `order` is only meaningful within this scope; the flat store list is
/// kept in server order and columns are derived on demand.
pub fn ordered_column<'a>(
    tasks: &'a [Task],
    project_id: &EntityId,
    status: TaskStatus,
) -> Vec<&'a Task> {
    let mut column: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.project_id == *project_id && t.status == status)
        .collect();
    column.sort_by_key(|t| t.order);
    column
}
