// ── Board move planning ──
//
// Pure half of the optimistic reorder: given the confirmed task list
// and a drop target, compute the working copy and the batched order
// patches, or nothing if the drop changes nothing. The async half
// (apply, network, reconcile-or-revert) lives in the tasks store.

use std::collections::HashMap;

use crate::model::{EntityId, Task, TaskStatus};
use crate::query::ordered_column;

/// One entry of the batched reorder write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderPatch {
    pub task_id: EntityId,
    pub status: TaskStatus,
    pub order: i64,
}

/// The computed outcome of a drop: the full working copy the view
/// should show immediately, and the patches describing the destination
/// column for the server.
#[derive(Debug, Clone)]
pub(crate) struct MovePlan {
    pub tasks: Vec<Task>,
    pub patches: Vec<OrderPatch>,
}

/// Plan a move of `task_id` to `dest_status` at `dest_index`.
///
/// Returns `None` for every no-op case: unknown task (dropped outside a
/// valid target) or a drop back onto the task's current position. The
/// destination index is clamped to the column length, and the whole
/// destination column is renumbered `0..n-1` -- moving a task shifts
/// its neighbors, so all of them are patched, even in a one-task
/// column.
pub(crate) fn plan_move(
    tasks: &[Task],
    task_id: &EntityId,
    dest_status: TaskStatus,
    dest_index: usize,
) -> Option<MovePlan> {
    let moved = tasks.iter().find(|t| t.id == *task_id)?;
    let project_id = moved.project_id.clone();

    let source_column = ordered_column(tasks, &project_id, moved.status);
    let source_index = source_column.iter().position(|t| t.id == *task_id)?;

    // Idempotence guard: same column, same slot.
    if moved.status == dest_status && source_index == dest_index {
        return None;
    }

    let mut destination: Vec<EntityId> = ordered_column(tasks, &project_id, dest_status)
        .into_iter()
        .filter(|t| t.id != *task_id)
        .map(|t| t.id.clone())
        .collect();

    let index = dest_index.min(destination.len());
    destination.insert(index, task_id.clone());

    let placements: HashMap<EntityId, i64> = destination
        .iter()
        .enumerate()
        .map(|(position, id)| (id.clone(), i64::try_from(position).unwrap_or(i64::MAX)))
        .collect();

    let working = tasks
        .iter()
        .map(|task| {
            let mut task = task.clone();
            if let Some(&order) = placements.get(&task.id) {
                task.status = dest_status;
                task.order = order;
            }
            task
        })
        .collect();

    let patches = destination
        .into_iter()
        .enumerate()
        .map(|(position, id)| OrderPatch {
            task_id: id,
            status: dest_status,
            order: i64::try_from(position).unwrap_or(i64::MAX),
        })
        .collect();

    Some(MovePlan {
        tasks: working,
        patches,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus, order: i64) -> Task {
        Task {
            id: EntityId::from(id),
            project_id: EntityId::from("p1"),
            title: format!("task {id}"),
            description: String::new(),
            assignee: None,
            due_date: None,
            status,
            priority: None,
            order,
        }
    }

    fn board() -> Vec<Task> {
        vec![
            task("a", TaskStatus::ToDo, 0),
            task("b", TaskStatus::ToDo, 1),
            task("c", TaskStatus::Done, 0),
            task("d", TaskStatus::Done, 1),
        ]
    }

    fn column_ids(tasks: &[Task], status: TaskStatus) -> Vec<String> {
        ordered_column(tasks, &EntityId::from("p1"), status)
            .iter()
            .map(|t| t.id.as_str().to_owned())
            .collect()
    }

    #[test]
    fn drop_on_current_position_is_a_noop() {
        let tasks = board();
        assert!(plan_move(&tasks, &EntityId::from("a"), TaskStatus::ToDo, 0).is_none());
        assert!(plan_move(&tasks, &EntityId::from("d"), TaskStatus::Done, 1).is_none());
    }

    #[test]
    fn unknown_task_is_a_noop() {
        let tasks = board();
        assert!(plan_move(&tasks, &EntityId::from("zz"), TaskStatus::Done, 0).is_none());
    }

    #[test]
    fn cross_column_move_patches_whole_destination() {
        let tasks = board();
        let plan = plan_move(&tasks, &EntityId::from("a"), TaskStatus::Done, 0).unwrap();

        // a lands at the head of Done; c and d shift down.
        assert_eq!(
            column_ids(&plan.tasks, TaskStatus::Done),
            vec!["a", "c", "d"]
        );
        assert_eq!(column_ids(&plan.tasks, TaskStatus::ToDo), vec!["b"]);

        assert_eq!(plan.patches.len(), 3);
        for (i, patch) in plan.patches.iter().enumerate() {
            assert_eq!(patch.status, TaskStatus::Done);
            assert_eq!(patch.order, i64::try_from(i).unwrap());
        }
        assert_eq!(plan.patches[0].task_id, EntityId::from("a"));
    }

    #[test]
    fn reorder_within_column_renumbers_contiguously() {
        let tasks = board();
        let plan = plan_move(&tasks, &EntityId::from("a"), TaskStatus::ToDo, 1).unwrap();

        assert_eq!(column_ids(&plan.tasks, TaskStatus::ToDo), vec!["b", "a"]);
        let orders: Vec<i64> = plan.patches.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn single_task_column_still_writes_order_zero() {
        let tasks = vec![task("solo", TaskStatus::ToDo, 5)];
        let plan = plan_move(&tasks, &EntityId::from("solo"), TaskStatus::Done, 0).unwrap();

        assert_eq!(plan.patches.len(), 1);
        assert_eq!(plan.patches[0].order, 0);
        assert_eq!(plan.tasks[0].status, TaskStatus::Done);
    }

    #[test]
    fn destination_index_is_clamped() {
        let tasks = board();
        let plan = plan_move(&tasks, &EntityId::from("a"), TaskStatus::Done, 99).unwrap();
        assert_eq!(
            column_ids(&plan.tasks, TaskStatus::Done),
            vec!["c", "d", "a"]
        );
    }

    #[test]
    fn other_projects_are_untouched() {
        let mut tasks = board();
        let mut foreign = task("x", TaskStatus::Done, 0);
        foreign.project_id = EntityId::from("p2");
        tasks.push(foreign);

        let plan = plan_move(&tasks, &EntityId::from("a"), TaskStatus::Done, 0).unwrap();
        assert_eq!(plan.patches.len(), 3);
        assert!(plan.patches.iter().all(|p| p.task_id.as_str() != "x"));

        let untouched = plan.tasks.iter().find(|t| t.id.as_str() == "x").unwrap();
        assert_eq!(untouched.order, 0);
    }
}
