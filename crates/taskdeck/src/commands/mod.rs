//! Command dispatch.

pub mod analytics;
pub mod auth;
pub mod board;
pub mod config_cmd;
pub mod projects;
pub mod tasks;
pub mod team;
pub mod util;

use taskdeck_core::Workspace;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    workspace: &Workspace,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Login(args) => auth::login(workspace, args, global).await,
        Command::Signup(args) => auth::signup(workspace, args, global).await,
        Command::Logout => auth::logout(workspace, global),
        Command::Whoami(args) => auth::whoami(workspace, args, global).await,
        Command::Projects(args) => projects::handle(workspace, args, global).await,
        Command::Tasks(args) => tasks::handle(workspace, args, global).await,
        Command::Board(args) => board::handle(workspace, args, global).await,
        Command::Team(args) => team::handle(workspace, args, global).await,
        Command::Analytics(args) => analytics::handle(workspace, args, global).await,
        Command::Config(_) => unreachable!("config handled before workspace construction"),
    }
}
