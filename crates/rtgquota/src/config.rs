//! CLI configuration: turns parsed flags into core types.
//!
//! Two boundaries live here. `check_config` validates the check inputs and
//! never touches disk or network, so a bad flag exits before any database
//! contact. `source_config` layers `--db-*` flags over the config file and
//! environment loaded by `rtgquota_config`.

use rtgquota_config::{Database, load_config, load_config_from};
use rtgquota_core::{
    CheckConfig, DirectionFilter, DynamicParams, RolloverDay, SourceConfig, Target,
    ThresholdMode,
};

use crate::cli::{Cli, DbOpts, Direction};
use crate::error::CliError;

impl From<Direction> for DirectionFilter {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Both => Self::Both,
        }
    }
}

/// Validate the check flags into a `CheckConfig`.
pub fn check_config(cli: &Cli) -> Result<CheckConfig, CliError> {
    let target = Target {
        router: non_empty("-H", &cli.host)?,
        interface: non_empty("-i", &cli.interface)?,
    };

    let mut cfg = CheckConfig::new(target, RolloverDay::new(cli.rollover)?);
    cfg.direction = cli.direction.into();
    cfg.quota_gb = cli.quota;
    cfg.warn = threshold_mode("-w", &cli.warn)?;
    cfg.crit = threshold_mode("-c", &cli.crit)?;
    cfg.warn_curve = DynamicParams::new(cli.curves.warn_buffer, cli.curves.warn_play)?;
    cfg.crit_curve = DynamicParams::new(cli.curves.crit_buffer, cli.curves.crit_play)?;
    Ok(cfg)
}

/// Resolve database settings: flag > env > config file > defaults.
pub fn source_config(opts: &DbOpts) -> Result<SourceConfig, CliError> {
    let cfg = match opts.config.as_deref() {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let mut db = cfg.database;
    apply_overrides(&mut db, opts);
    Ok(rtgquota_config::to_source_config(&db)?)
}

fn apply_overrides(db: &mut Database, opts: &DbOpts) {
    if let Some(ref host) = opts.db_host {
        db.host.clone_from(host);
    }
    if let Some(port) = opts.db_port {
        db.port = port;
    }
    if let Some(ref name) = opts.db_name {
        db.name.clone_from(name);
    }
    if let Some(ref user) = opts.db_user {
        db.username.clone_from(user);
    }
    if let Some(timeout) = opts.db_timeout {
        db.timeout = timeout;
    }
}

fn threshold_mode(flag: &str, value: &str) -> Result<ThresholdMode, CliError> {
    value.parse().map_err(|reason| CliError::Validation {
        field: flag.into(),
        reason,
    })
}

fn non_empty(flag: &str, value: &str) -> Result<String, CliError> {
    if value.trim().is_empty() {
        return Err(CliError::Validation {
            field: flag.into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(value.to_owned())
}
