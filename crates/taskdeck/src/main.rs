mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskdeck_config::FsSessionStore;
use taskdeck_core::Workspace;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a workspace
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Everything else does
        cmd => {
            let workspace = build_workspace(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &workspace, &cli.global).await
        }
    }
}

/// Build a `Workspace` from the config file, profile, and CLI overrides.
fn build_workspace(global: &cli::GlobalOpts) -> Result<Workspace, CliError> {
    let cfg = taskdeck_config::load_config_or_default();
    let (_, mut profile) = taskdeck_config::resolve_profile(&cfg, global.profile.as_deref())?;

    if let Some(ref server) = global.server {
        profile.server = server.clone();
    }

    let client_config = taskdeck_config::profile_to_client_config(&cfg, &profile)?;
    let sessions = Arc::new(FsSessionStore::new());

    Workspace::new(&client_config, sessions).map_err(CliError::from)
}
