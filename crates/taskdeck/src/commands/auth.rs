//! Auth command handlers: login, signup, logout, whoami.

use owo_colors::OwoColorize;
use secrecy::SecretString;

use taskdeck_core::Workspace;

use crate::cli::{GlobalOpts, LoginArgs, SignupArgs, WhoamiArgs};
use crate::error::CliError;
use crate::output;

pub async fn login(
    workspace: &Workspace,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let password = rpassword::prompt_password("Password: ")?;

    let session = workspace
        .auth()
        .login(&email, SecretString::from(password))
        .await?;

    if !global.quiet {
        let name = &session.user.name;
        if output::should_color(&global.color) {
            eprintln!("Logged in as {}", name.green().bold());
        } else {
            eprintln!("Logged in as {name}");
        }
    }
    Ok(())
}

pub async fn signup(
    workspace: &Workspace,
    args: SignupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = rpassword::prompt_password("Password: ")?;
    let again = rpassword::prompt_password("Confirm password: ")?;
    if password != again {
        return Err(CliError::Usage {
            field: "password".into(),
            reason: "passwords do not match".into(),
        });
    }

    let session = workspace
        .auth()
        .signup(&args.name, &args.email, SecretString::from(password))
        .await?;

    if !global.quiet {
        eprintln!("Account created -- logged in as {}", session.user.name);
    }
    Ok(())
}

pub fn logout(workspace: &Workspace, global: &GlobalOpts) -> Result<(), CliError> {
    workspace.logout();
    if !global.quiet {
        eprintln!("Logged out");
    }
    Ok(())
}

pub async fn whoami(
    workspace: &Workspace,
    args: WhoamiArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.refresh {
        workspace.auth().fetch_user_info().await?;
    }

    let snapshot = workspace.auth().snapshot();
    let user = snapshot.user().ok_or(CliError::AuthRequired)?;

    let out = output::render_single(
        &global.output,
        user,
        |u| format!("{} <{}> ({})", u.name, u.email, u.role),
        |u| u.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
