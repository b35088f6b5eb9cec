//! Config command handlers.

use taskdeck_config::{Profile, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg)
                .map_err(taskdeck_config::ConfigError::Serialization)?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::SetServer { url } => {
            // Validate before writing anything.
            url.parse::<url::Url>().map_err(|_| CliError::Usage {
                field: "server".into(),
                reason: format!("invalid URL: {url}"),
            })?;

            let mut cfg = load_config_or_default();
            let profile_name = global
                .profile
                .clone()
                .or_else(|| cfg.default_profile.clone())
                .unwrap_or_else(|| "default".into());

            cfg.profiles
                .entry(profile_name.clone())
                .or_insert_with(Profile::default)
                .server = url.clone();
            save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Profile '{profile_name}' now points at {url}");
            }
            Ok(())
        }
    }
}
