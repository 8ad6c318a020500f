//! Configuration for the `check_rtgquota` plugin.
//!
//! Database connection settings come from a TOML file, `RTGQUOTA_*`
//! environment variables, and (in the CLI) command-line flags. The password
//! is resolved through env → system keyring → plaintext, and everything is
//! translated into `rtgquota_core::SourceConfig` here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rtgquota_core::SourceConfig;

/// Environment variable consulted first for the database password.
pub const PASSWORD_ENV: &str = "RTGQUOTA_DATABASE_PASSWORD";

const KEYRING_SERVICE: &str = "rtgquota";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for {username}@{host}")]
    NoCredentials { username: String, host: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// RTG database connection.
    #[serde(default)]
    pub database: Database,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Database {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Schema name.
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_username")]
    pub username: String,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Connect timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            name: default_name(),
            username: default_username(),
            password: None,
            timeout: default_timeout(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    3306
}
fn default_name() -> String {
    "rtg".into()
}
fn default_username() -> String {
    "rtg".into()
}
fn default_timeout() -> u64 {
    5
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rtgquota", "rtgquota").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rtgquota");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from the default path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file is not an error;
/// the defaults (and env) apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RTGQUOTA_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the database password.
///
/// Order: `RTGQUOTA_DATABASE_PASSWORD`, then the system keyring entry
/// `rtgquota` / `<username>@<host>`, then the plaintext config value.
pub fn resolve_password(db: &Database) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    let account = format!("{}@{}", db.username, db.host);
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &account) {
        if let Ok(pw) = entry.get_password() {
            tracing::debug!(%account, "using password from keyring");
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = db.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        username: db.username.clone(),
        host: db.host.clone(),
    })
}

/// Build a `SourceConfig` from database settings.
pub fn to_source_config(db: &Database) -> Result<SourceConfig, ConfigError> {
    if db.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "database.host".into(),
            reason: "must not be empty".into(),
        });
    }
    if db.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "database.timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let password = resolve_password(db)?;

    Ok(SourceConfig {
        host: db.host.clone(),
        port: db.port,
        database: db.name.clone(),
        username: db.username.clone(),
        password,
        timeout: Duration::from_secs(db.timeout),
    })
}
