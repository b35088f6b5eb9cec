//! Kanban board handlers: column view and optimistic moves.

use owo_colors::OwoColorize;

use taskdeck_core::query::ordered_column;
use taskdeck_core::{EntityId, MoveTask, NoticeLevel, TaskStatus, Workspace};

use crate::cli::{BoardArgs, BoardCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    workspace: &Workspace,
    args: BoardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BoardCommand::Show { project } => show(workspace, &EntityId::from(project), global).await,
        BoardCommand::Move { task, to, index } => {
            move_task(workspace, &EntityId::from(task), to.into(), index, global).await
        }
    }
}

async fn show(
    workspace: &Workspace,
    project: &EntityId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    workspace.tasks().fetch_for_project(project).await?;
    let snap = workspace.tasks().snapshot();

    match global.output {
        OutputFormat::Table | OutputFormat::Plain => {
            let color = output::should_color(&global.color);
            let mut lines = Vec::new();
            for status in TaskStatus::ALL {
                let column = ordered_column(snap.visible(), project, status);
                let header = format!("{status} ({})", column.len());
                lines.push(if color {
                    header.bold().to_string()
                } else {
                    header
                });
                for task in column {
                    lines.push(format!(
                        "  [{}] {} {}",
                        task.id,
                        task.title,
                        util::assignee_label(task.assignee.as_ref())
                    ));
                }
                lines.push(String::new());
            }
            output::print_output(lines.join("\n").trim_end(), global.quiet);
        }
        _ => {
            // Structured output: columns keyed by status.
            let board: serde_json::Value = serde_json::json!({
                "To Do": ordered_column(snap.visible(), project, TaskStatus::ToDo),
                "In Progress": ordered_column(snap.visible(), project, TaskStatus::InProgress),
                "Done": ordered_column(snap.visible(), project, TaskStatus::Done),
            });
            let out = output::render_single(&global.output, &board, |_| String::new(), |_| {
                String::new()
            });
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

async fn move_task(
    workspace: &Workspace,
    task_id: &EntityId,
    dest_status: TaskStatus,
    dest_index: Option<usize>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The store needs the board loaded before it can plan the move.
    workspace.tasks().fetch_all().await?;

    let snap = workspace.tasks().snapshot();
    let task = snap
        .visible()
        .iter()
        .find(|t| t.id == *task_id)
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            message: format!("task {task_id}"),
        })?;

    // Default destination: the end of the target column.
    let dest_index = dest_index.unwrap_or_else(|| {
        let column = ordered_column(snap.visible(), &task.project_id, dest_status);
        if task.status == dest_status {
            column.len().saturating_sub(1)
        } else {
            column.len()
        }
    });

    let mut notices = workspace.notices();
    let moved = workspace
        .tasks()
        .move_task(MoveTask {
            task_id: task_id.clone(),
            dest_status,
            dest_index,
        })
        .await?;

    if !global.quiet {
        if moved {
            match notices.try_recv() {
                Ok(notice) if notice.level == NoticeLevel::Success => {
                    eprintln!("{}", notice.message);
                }
                _ => eprintln!("Task order updated"),
            }
        } else {
            eprintln!("Nothing to move -- task already there");
        }
    }
    Ok(())
}
