// ── Task filtering ──

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::model::{DueBucket, Task, TaskStatus};

/// Who a task must be assigned to (or not) to pass the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
    Unassigned,
    /// Matches a hydrated assignee by display name.
    Name(String),
}

/// Search and filter criteria over a task snapshot. Empty criteria
/// match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring over title and description.
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
    pub assignee: Option<AssigneeFilter>,
    pub due: Option<DueBucket>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.status.is_none()
            && self.assignee.is_none()
            && self.due.is_none()
    }
}

/// Bucket a task's due date against the local calendar day.
///
/// Both sides are truncated to midnight in the local timezone before
/// comparison, so "today" means the calendar day, not a 24h window.
pub fn due_bucket_of(due: Option<DateTime<Utc>>, today: NaiveDate) -> DueBucket {
    DueBucket::classify(due.map(|d| d.with_timezone(&Local).date_naive()), today)
}

/// Apply a filter to a snapshot, preserving order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let today = Local::now().date_naive();
    filter_tasks_at(tasks, filter, today)
}

/// [`filter_tasks`] with an explicit reference day, for tests.
pub fn filter_tasks_at<'a>(
    tasks: &'a [Task],
    filter: &TaskFilter,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let needle = filter
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    tasks
        .iter()
        .filter(|task| {
            let matches_search = needle.as_deref().is_none_or(|needle| {
                task.title.to_lowercase().contains(needle)
                    || task.description.to_lowercase().contains(needle)
            });

            let matches_status = filter.status.is_none_or(|status| task.status == status);

            let matches_assignee = match &filter.assignee {
                None => true,
                Some(AssigneeFilter::Unassigned) => task.assignee.is_none(),
                Some(AssigneeFilter::Name(name)) => task
                    .assignee
                    .as_ref()
                    .and_then(|a| a.name())
                    .is_some_and(|n| n == name),
            };

            let matches_due = filter
                .due
                .is_none_or(|bucket| due_bucket_of(task.due_date, today) == bucket);

            matches_search && matches_status && matches_assignee && matches_due
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{EntityId, MemberRef, Role, TeamMember};
    use chrono::TimeZone;

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: EntityId::from(id),
            project_id: EntityId::from("p1"),
            title: title.into(),
            description: String::new(),
            assignee: None,
            due_date: None,
            status,
            priority: None,
            order: 0,
        }
    }

    fn assigned_to(mut t: Task, name: &str) -> Task {
        t.assignee = Some(MemberRef::Full(TeamMember {
            id: EntityId::from("u1"),
            name: name.into(),
            email: format!("{name}@x.com"),
            role: Role::Member,
        }));
        t
    }

    #[test]
    fn empty_filter_matches_everything() {
        let tasks = vec![task("t1", "Fix bug", TaskStatus::ToDo)];
        assert_eq!(filter_tasks(&tasks, &TaskFilter::default()).len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let mut described = task("t2", "Other", TaskStatus::ToDo);
        described.description = "touches the LOGIN flow".into();
        let tasks = vec![task("t1", "Fix Login bug", TaskStatus::ToDo), described];

        let filter = TaskFilter {
            search: Some("login".into()),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks(&tasks, &filter).len(), 2);
    }

    #[test]
    fn status_and_assignee_filters_compose() {
        let tasks = vec![
            assigned_to(task("t1", "a", TaskStatus::Done), "Ada"),
            assigned_to(task("t2", "b", TaskStatus::ToDo), "Ada"),
            task("t3", "c", TaskStatus::Done),
        ];

        let filter = TaskFilter {
            status: Some(TaskStatus::Done),
            assignee: Some(AssigneeFilter::Name("Ada".into())),
            ..TaskFilter::default()
        };
        let hits = filter_tasks(&tasks, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "t1");

        let unassigned = TaskFilter {
            assignee: Some(AssigneeFilter::Unassigned),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks(&tasks, &unassigned).len(), 1);
    }

    #[test]
    fn due_filter_buckets_by_local_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let due = Local
            .with_ymd_and_hms(2026, 3, 9, 23, 30, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);

        let mut overdue = task("t1", "late", TaskStatus::ToDo);
        overdue.due_date = Some(due);
        let tasks = vec![overdue, task("t2", "no date", TaskStatus::ToDo)];

        let filter = TaskFilter {
            due: Some(DueBucket::Overdue),
            ..TaskFilter::default()
        };
        let hits = filter_tasks_at(&tasks, &filter, today);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "t1");

        let no_date = TaskFilter {
            due: Some(DueBucket::NoDate),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks_at(&tasks, &no_date, today).len(), 1);
    }
}
