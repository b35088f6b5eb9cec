//! Shared helpers for command handlers.

use chrono::{DateTime, NaiveDate, Utc};

use taskdeck_core::MemberRef;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse a `YYYY-MM-DD` argument into a UTC midnight timestamp.
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, CliError> {
    let date: NaiveDate = raw.parse().map_err(|_| CliError::Usage {
        field: "due".into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| CliError::Usage {
        field: "due".into(),
        reason: "invalid date".into(),
    })?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

/// Render a member reference for display: name if hydrated, id otherwise.
pub fn member_label(member: &MemberRef) -> String {
    member
        .name()
        .map_or_else(|| member.id().to_string(), str::to_owned)
}

/// Render an optional assignee, "-" when there is none.
pub fn assignee_label(assignee: Option<&MemberRef>) -> String {
    assignee.map_or_else(|| "-".into(), member_label)
}
