//! Shared configuration for the taskdeck CLI.
//!
//! TOML profiles, environment overrides, and the durable session store
//! (the `token` / `user` key pair that survives restarts). The CLI
//! translates a resolved profile into `taskdeck_core::ClientConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use taskdeck_core::{ClientConfig, CoreError, Session, SessionStore};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Page size for paginated lists.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            page_limit: default_page_limit(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_limit() -> u32 {
    6
}

/// A named backend profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:5000").
    pub server: String,

    /// Override the request timeout (seconds).
    pub timeout: Option<u64>,

    /// Override the read deadline for list calls (seconds).
    pub read_timeout: Option<u64>,

    /// Override the page size.
    pub page_limit: Option<u32>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server: "http://localhost:5000".into(),
            timeout: None,
            read_timeout: None,
            page_limit: None,
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "taskdeck", "taskdeck")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the session storage directory.
pub fn session_dir() -> PathBuf {
    project_dirs().map_or_else(dirs_fallback, |dirs| dirs.data_dir().to_path_buf())
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("taskdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("TASKDECK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// Look up a profile by name, falling back to the configured default.
/// A missing config resolves to the built-in default profile.
pub fn resolve_profile(
    config: &Config,
    name: Option<&str>,
) -> Result<(String, Profile), ConfigError> {
    let profile_name = name
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    if let Some(profile) = config.profiles.get(&profile_name) {
        Ok((
            profile_name,
            Profile {
                server: profile.server.clone(),
                timeout: profile.timeout,
                read_timeout: profile.read_timeout,
                page_limit: profile.page_limit,
            },
        ))
    } else if name.is_none() {
        // No explicit profile requested and none configured: local dev.
        Ok((profile_name, Profile::default()))
    } else {
        Err(ConfigError::UnknownProfile {
            profile: profile_name,
        })
    }
}

/// Build a `ClientConfig` from a resolved profile.
pub fn profile_to_client_config(
    config: &Config,
    profile: &Profile,
) -> Result<ClientConfig, ConfigError> {
    let base_url: url::Url = profile
        .server
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", profile.server),
        })?;

    let defaults = ClientConfig::default();
    Ok(ClientConfig {
        base_url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(config.defaults.timeout)),
        read_timeout: profile
            .read_timeout
            .map_or(defaults.read_timeout, Duration::from_secs),
        page_limit: profile.page_limit.unwrap_or(config.defaults.page_limit),
    })
}

// ── Durable session storage ─────────────────────────────────────────

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user.json";

/// Filesystem-backed [`SessionStore`]: the token as a plain string
/// under one key, the user profile as JSON under the other. Restored
/// at process start, cleared on logout.
#[derive(Debug, Clone)]
pub struct FsSessionStore {
    dir: PathBuf,
}

impl FsSessionStore {
    /// Store under the platform data directory.
    pub fn new() -> Self {
        Self { dir: session_dir() }
    }

    /// Store under an explicit directory (tests).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_KEY)
    }
}

impl Default for FsSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FsSessionStore {
    fn save(&self, session: &Session) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir).map_err(storage_err)?;
        std::fs::write(self.token_path(), &session.token).map_err(storage_err)?;
        let user = serde_json::to_vec_pretty(&session.user).map_err(storage_err)?;
        std::fs::write(self.user_path(), user).map_err(storage_err)?;
        debug!(dir = %self.dir.display(), "session persisted");
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, CoreError> {
        let token = match std::fs::read_to_string(self.token_path()) {
            Ok(token) => token.trim().to_owned(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_err(e)),
        };
        if token.is_empty() {
            return Ok(None);
        }

        let user_bytes = match std::fs::read(self.user_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_err(e)),
        };
        let user = serde_json::from_slice(&user_bytes).map_err(storage_err)?;

        Ok(Some(Session { user, token }))
    }

    fn clear(&self) -> Result<(), CoreError> {
        for path in [self.token_path(), self.user_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(storage_err(e)),
            }
        }
        Ok(())
    }
}

fn storage_err(err: impl std::fmt::Display) -> CoreError {
    CoreError::Storage {
        message: err.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use taskdeck_core::{EntityId, Role, User};

    fn session() -> Session {
        Session {
            user: User {
                id: EntityId::from("u1"),
                name: "Ada".into(),
                email: "a@x.com".into(),
                role: Role::Owner,
            },
            token: "jwt-abc".into(),
        }
    }

    #[test]
    fn session_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::at(dir.path());

        assert!(store.load().unwrap().is_none());

        store.save(&session()).unwrap();
        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, session());

        // Exactly two keys on disk.
        assert!(dir.path().join("token").exists());
        assert!(dir.path().join("user.json").exists());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn missing_user_key_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSessionStore::at(dir.path());
        store.save(&session()).unwrap();
        std::fs::remove_file(dir.path().join("user.json")).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn profile_resolution_falls_back_to_local_default() {
        let config = Config::default();
        let (name, profile) = resolve_profile(&config, None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile.server, "http://localhost:5000");

        let err = resolve_profile(&config, Some("prod")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
    }

    #[test]
    fn profile_overrides_defaults() {
        let mut config = Config::default();
        config.profiles.insert(
            "prod".into(),
            Profile {
                server: "https://tasks.example.com".into(),
                timeout: Some(5),
                read_timeout: None,
                page_limit: Some(20),
            },
        );

        let (_, profile) = resolve_profile(&config, Some("prod")).unwrap();
        let client = profile_to_client_config(&config, &profile).unwrap();
        assert_eq!(client.base_url.as_str(), "https://tasks.example.com/");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.page_limit, 20);
    }
}
