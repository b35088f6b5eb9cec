//! Analytics handlers: aggregate counts over the task snapshot.
//!
//! Pure consumers of already-fetched data -- no chart rendering here.

use tabled::Tabled;

use taskdeck_core::query::{project_task_counts, status_counts};
use taskdeck_core::{EntityId, Workspace};

use crate::cli::{AnalyticsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Clone, Tabled, serde::Serialize)]
struct CountsRow {
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "To Do")]
    to_do: usize,
    #[tabled(rename = "In Progress")]
    in_progress: usize,
    #[tabled(rename = "Done")]
    done: usize,
    #[tabled(rename = "Done %")]
    completion: String,
}

pub async fn handle(
    workspace: &Workspace,
    args: AnalyticsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.project {
        Some(id) => {
            workspace
                .tasks()
                .fetch_for_project(&EntityId::from(id))
                .await?;
        }
        None => workspace.tasks().fetch_all().await?,
    }

    let snap = workspace.tasks().snapshot();
    let tasks = snap.visible();

    let mut rows = Vec::new();
    let totals = status_counts(tasks);
    rows.push(CountsRow {
        scope: "all".into(),
        to_do: totals.to_do,
        in_progress: totals.in_progress,
        done: totals.done,
        completion: format!("{}%", totals.completion_pct()),
    });

    for (project_id, counts) in project_task_counts(tasks) {
        rows.push(CountsRow {
            scope: project_id.to_string(),
            to_do: counts.to_do,
            in_progress: counts.in_progress,
            done: counts.done,
            completion: format!("{}%", counts.completion_pct()),
        });
    }

    let out = output::render_list(&global.output, &rows, Clone::clone, |r| r.scope.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
