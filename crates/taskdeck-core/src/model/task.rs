// ── Task domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::member::MemberRef;

/// Kanban column a task sits in.
///
/// The canonical vocabulary is the display set (`To Do`, `In Progress`,
/// `Done`), which is also what the backend expects on writes. Reads go
/// through [`TaskStatus::normalize`] because deployed backends answer
/// with two different vocabularies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    #[strum(serialize = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    #[strum(serialize = "Done")]
    Done,
}

impl TaskStatus {
    /// Board columns in display order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// Map a raw backend status onto the canonical vocabulary.
    ///
    /// Accepts both vocabularies seen in the wild (`To Do`/`In
    /// Progress`/`Done` and `pending`/`in-progress`/`completed`);
    /// anything unrecognized lands in `To Do` so a bad status can never
    /// drop a task off the board.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim() {
            "In Progress" | "in-progress" | "in_progress" => Self::InProgress,
            "Done" | "completed" | "complete" => Self::Done,
            _ => Self::ToDo,
        }
    }

    /// The string the backend expects in payloads.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub project_id: EntityId,
    pub title: String,
    pub description: String,
    pub assignee: Option<MemberRef>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    /// Position within the (project, status) column. Unique and
    /// contiguous from 0 after any successful reorder.
    pub order: i64,
}

/// Due-date bucket relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum DueBucket {
    Overdue,
    Today,
    #[strum(serialize = "This Week")]
    ThisWeek,
    Later,
    #[strum(serialize = "No Date")]
    NoDate,
}

impl DueBucket {
    /// Bucket a due date against `today`, comparing calendar days only
    /// (both sides truncated to local midnight by the caller).
    pub fn classify(due: Option<NaiveDate>, today: NaiveDate) -> Self {
        match due {
            None => Self::NoDate,
            Some(date) if date < today => Self::Overdue,
            Some(date) if date == today => Self::Today,
            Some(date) if (date - today).num_days() <= 7 => Self::ThisWeek,
            Some(_) => Self::Later,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_display_vocabulary() {
        assert_eq!(TaskStatus::normalize("To Do"), TaskStatus::ToDo);
        assert_eq!(TaskStatus::normalize("In Progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::normalize("Done"), TaskStatus::Done);
    }

    #[test]
    fn normalize_accepts_legacy_vocabulary() {
        assert_eq!(TaskStatus::normalize("pending"), TaskStatus::ToDo);
        assert_eq!(TaskStatus::normalize("in-progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::normalize("completed"), TaskStatus::Done);
    }

    #[test]
    fn normalize_defaults_unknown_to_todo() {
        assert_eq!(TaskStatus::normalize("archived"), TaskStatus::ToDo);
        assert_eq!(TaskStatus::normalize(""), TaskStatus::ToDo);
        assert_eq!(TaskStatus::normalize("DONE"), TaskStatus::ToDo);
    }

    #[test]
    fn wire_strings_round_trip_through_normalize() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::normalize(status.as_wire()), status);
        }
    }

    #[test]
    fn due_buckets() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d);

        assert_eq!(DueBucket::classify(None, today), DueBucket::NoDate);
        assert_eq!(DueBucket::classify(day(9), today), DueBucket::Overdue);
        assert_eq!(DueBucket::classify(day(10), today), DueBucket::Today);
        assert_eq!(DueBucket::classify(day(11), today), DueBucket::ThisWeek);
        assert_eq!(DueBucket::classify(day(17), today), DueBucket::ThisWeek);
        assert_eq!(DueBucket::classify(day(18), today), DueBucket::Later);
    }
}
