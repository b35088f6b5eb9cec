//! Task command handlers.

use tabled::Tabled;

use taskdeck_core::query::{AssigneeFilter, TaskFilter, filter_tasks};
use taskdeck_core::{EntityId, NewTask, Task, TaskChanges, Workspace};

use crate::cli::{GlobalOpts, TasksArgs, TasksCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Due")]
    due: String,
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id.to_string(),
            title: t.title.clone(),
            status: t.status.to_string(),
            assignee: util::assignee_label(t.assignee.as_ref()),
            due: t
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: TasksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TasksCommand::List {
            project,
            search,
            status,
            assignee,
            due,
        } => {
            match project {
                Some(id) => {
                    workspace
                        .tasks()
                        .fetch_for_project(&EntityId::from(id))
                        .await?;
                }
                None => workspace.tasks().fetch_all().await?,
            }

            let filter = TaskFilter {
                search,
                status: status.map(Into::into),
                assignee: assignee.map(|name| {
                    if name.eq_ignore_ascii_case("none") {
                        AssigneeFilter::Unassigned
                    } else {
                        AssigneeFilter::Name(name)
                    }
                }),
                due: due.map(Into::into),
            };

            let snap = workspace.tasks().snapshot();
            let visible: Vec<Task> = filter_tasks(snap.visible(), &filter)
                .into_iter()
                .cloned()
                .collect();

            let out = output::render_list(
                &global.output,
                &visible,
                |t| TaskRow::from(t),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);

            if !global.quiet && visible.is_empty() {
                let total = snap.visible().len();
                if total == 0 {
                    eprintln!("No tasks found");
                } else {
                    eprintln!("No tasks match your filters ({total} cached)");
                }
            }
            Ok(())
        }

        TasksCommand::Create {
            project,
            title,
            description,
            assignee,
            due,
            status,
        } => {
            let due_date = due.as_deref().map(util::parse_due_date).transpose()?;
            let task = workspace
                .tasks()
                .create(NewTask {
                    project_id: EntityId::from(project),
                    title,
                    description,
                    assignee: assignee
                        .filter(|a| !a.eq_ignore_ascii_case("unassigned"))
                        .map(EntityId::from),
                    due_date,
                    status: status.map(Into::into),
                })
                .await?;
            if !global.quiet {
                eprintln!("Task created: {} ({})", task.title, task.id);
            }
            Ok(())
        }

        TasksCommand::Update {
            id,
            title,
            description,
            status,
            assignee,
            due,
        } => {
            let assignee = assignee.map(|a| {
                if a.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(EntityId::from(a))
                }
            });
            let due_date = match due.as_deref() {
                None => None,
                Some(raw) if raw.eq_ignore_ascii_case("none") => Some(None),
                Some(raw) => Some(Some(util::parse_due_date(raw)?)),
            };

            let task = workspace
                .tasks()
                .update_task(
                    &EntityId::from(id),
                    TaskChanges {
                        title,
                        description,
                        assignee,
                        due_date,
                        status: status.map(Into::into),
                        priority: None,
                    },
                )
                .await?;
            if !global.quiet {
                eprintln!("Task updated: {} [{}]", task.title, task.status);
            }
            Ok(())
        }

        TasksCommand::Delete { id } => {
            if !util::confirm(&format!("Delete task {id}?"), global.yes)? {
                return Ok(());
            }
            workspace.tasks().delete(&EntityId::from(id)).await?;
            if !global.quiet {
                eprintln!("Task deleted");
            }
            Ok(())
        }

        TasksCommand::Comments { id } => {
            let comments = workspace.tasks().comments(&EntityId::from(id)).await?;

            #[derive(Tabled)]
            struct CommentRow {
                #[tabled(rename = "When")]
                when: String,
                #[tabled(rename = "Author")]
                author: String,
                #[tabled(rename = "Comment")]
                content: String,
            }

            let out = output::render_list(
                &global.output,
                &comments,
                |c| CommentRow {
                    when: c
                        .created_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                    author: c.user_id.to_string(),
                    content: if c.is_edited {
                        format!("{} (edited)", c.content)
                    } else {
                        c.content.clone()
                    },
                },
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TasksCommand::Comment { id, text } => {
            workspace
                .tasks()
                .add_comment(&EntityId::from(id), &text)
                .await?;
            if !global.quiet {
                eprintln!("Comment added");
            }
            Ok(())
        }
    }
}
