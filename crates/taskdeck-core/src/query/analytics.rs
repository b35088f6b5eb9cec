// ── Aggregate views ──
//
// Count-style aggregations consumed by the analytics surface. Chart
// rendering is someone else's problem; this stops at the numbers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{EntityId, Task, TaskStatus};

/// Task counts per board column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub to_do: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.to_do + self.in_progress + self.done
    }

    /// Completed share in percent, rounded down. Zero tasks counts as 0.
    pub fn completion_pct(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        u8::try_from(self.done * 100 / total).unwrap_or(100)
    }

    fn bump(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::ToDo => self.to_do += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Done => self.done += 1,
        }
    }
}

/// Count tasks by status across the whole snapshot.
pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        counts.bump(task.status);
    }
    counts
}

/// Count tasks by status, grouped per project.
pub fn project_task_counts(tasks: &[Task]) -> BTreeMap<EntityId, StatusCounts> {
    let mut by_project: BTreeMap<EntityId, StatusCounts> = BTreeMap::new();
    for task in tasks {
        by_project
            .entry(task.project_id.clone())
            .or_default()
            .bump(task.status);
    }
    by_project
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(project: &str, status: TaskStatus) -> Task {
        Task {
            id: EntityId::from("t"),
            project_id: EntityId::from(project),
            title: String::new(),
            description: String::new(),
            assignee: None,
            due_date: None,
            status,
            priority: None,
            order: 0,
        }
    }

    #[test]
    fn counts_by_status_and_project() {
        let tasks = vec![
            task("p1", TaskStatus::ToDo),
            task("p1", TaskStatus::Done),
            task("p2", TaskStatus::Done),
        ];

        let totals = status_counts(&tasks);
        assert_eq!(totals.to_do, 1);
        assert_eq!(totals.done, 2);
        assert_eq!(totals.total(), 3);

        let by_project = project_task_counts(&tasks);
        assert_eq!(by_project[&EntityId::from("p1")].total(), 2);
        assert_eq!(by_project[&EntityId::from("p2")].done, 1);
    }

    #[test]
    fn completion_pct_handles_empty() {
        assert_eq!(StatusCounts::default().completion_pct(), 0);
        let counts = StatusCounts {
            to_do: 1,
            in_progress: 0,
            done: 1,
        };
        assert_eq!(counts.completion_pct(), 50);
    }
}
