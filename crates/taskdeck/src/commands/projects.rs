//! Project command handlers.

use tabled::Tabled;

use taskdeck_core::{EntityId, NewProject, Project, ProjectChanges, Workspace};

use crate::cli::{GlobalOpts, ProjectsArgs, ProjectsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Tasks")]
    tasks: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            members: p.members.len(),
            tasks: p.task_count.map(|c| c.to_string()).unwrap_or_default(),
            updated: p
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: ProjectsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProjectsCommand::List { page } => {
            workspace.projects().fetch(Some(page)).await?;
            let snap = workspace.projects().snapshot();

            let out = output::render_list(
                &global.output,
                &snap.list,
                |p| ProjectRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);

            if !global.quiet && snap.pagination.pages > 1 {
                eprintln!(
                    "Page {} of {} ({} total)",
                    snap.pagination.page, snap.pagination.pages, snap.pagination.total
                );
            }
            Ok(())
        }

        ProjectsCommand::Create {
            name,
            description,
            members,
        } => {
            let project = workspace
                .projects()
                .create(NewProject {
                    name,
                    description,
                    members,
                })
                .await?;
            if !global.quiet {
                eprintln!("Project created: {} ({})", project.name, project.id);
            }
            Ok(())
        }

        ProjectsCommand::Update {
            id,
            name,
            description,
        } => {
            let project = workspace
                .projects()
                .update_project(
                    &EntityId::from(id),
                    ProjectChanges {
                        name,
                        description,
                        members: None,
                    },
                )
                .await?;
            if !global.quiet {
                eprintln!("Project updated: {}", project.name);
            }
            Ok(())
        }

        ProjectsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete project {id}? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            workspace.projects().delete(&EntityId::from(id)).await?;
            if !global.quiet {
                eprintln!("Project deleted");
            }
            Ok(())
        }

        ProjectsCommand::Members { id } => {
            let members = workspace
                .projects()
                .fetch_members(&EntityId::from(id))
                .await?;

            #[derive(Tabled)]
            struct MemberRow {
                #[tabled(rename = "ID")]
                id: String,
                #[tabled(rename = "Name")]
                name: String,
                #[tabled(rename = "Email")]
                email: String,
            }

            let out = output::render_list(
                &global.output,
                &members,
                |m| MemberRow {
                    id: m.id().to_string(),
                    name: m.name().unwrap_or("(pending)").to_owned(),
                    email: m.email().unwrap_or("-").to_owned(),
                },
                |m| m.id().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProjectsCommand::AddMember { id, email } => {
            let project = workspace
                .projects()
                .add_member(&EntityId::from(id), &email)
                .await?;
            if !global.quiet {
                eprintln!(
                    "Added {email} to {} ({} members)",
                    project.name,
                    project.members.len()
                );
            }
            Ok(())
        }
    }
}
