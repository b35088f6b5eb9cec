//! Team directory handlers.

use tabled::Tabled;

use taskdeck_core::{EntityId, Role, TeamMember, Workspace};

use crate::cli::{GlobalOpts, TeamArgs, TeamCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&TeamMember> for MemberRow {
    fn from(m: &TeamMember) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name.clone(),
            email: m.email.clone(),
            role: m.role.to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: TeamArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TeamCommand::List => {
            workspace.team().fetch_members().await?;
            let snap = workspace.team().snapshot();

            let out = output::render_list(
                &global.output,
                &snap.members,
                |m| MemberRow::from(m),
                |m| m.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TeamCommand::Remove { id } => {
            let member_id = EntityId::from(id.as_str());

            // Client-side policy check. The server enforces the same
            // rules; its rejection flows through the normal error path
            // in case permissions changed since this snapshot.
            let auth = workspace.auth().snapshot();
            let me = auth.user().ok_or(CliError::AuthRequired)?;
            if me.role != Role::Owner {
                return Err(CliError::Permission {
                    reason: "only owners can remove members".into(),
                });
            }
            if me.id == member_id {
                return Err(CliError::Permission {
                    reason: "you cannot remove yourself".into(),
                });
            }

            if !util::confirm(&format!("Remove member {id} from the team?"), global.yes)? {
                return Ok(());
            }

            workspace.team().delete_member(&member_id).await?;
            if !global.quiet {
                eprintln!("Member removed");
            }
            Ok(())
        }
    }
}
