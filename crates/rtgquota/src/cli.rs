//! Clap derive structures for `check_rtgquota`.
//!
//! Flag names follow the usual Nagios plugin conventions (`-H`, `-w`, `-c`).
//! Help and version are wired by hand so both can exit with UNKNOWN (3)
//! like every other non-check outcome.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};

const DYNAMIC_HELP: &str = "\
If 'dyn' is selected for either warn or crit, the play and buffer settings can be used.
Dynamic warn/crit rises linearly across the billing period:
  Buffer is a reserved amount of bandwidth, i.e. on the last day of the period the value will be 100 - buffer.
  Play is an amount added at the start of the period for some extra wiggle room.
  The full formula is: (((100 - play - buffer) / days_in_month) * day_of_period) + play";

// ── Top-Level CLI ────────────────────────────────────────────────────

/// check_rtgquota -- bandwidth quota check against an RTG database
#[derive(Debug, Parser)]
#[command(
    name = "check_rtgquota",
    version,
    about = "Check bandwidth used since the last rollover date against a quota",
    long_about = "Checks bandwidth used by a router interface since the last monthly \
        rollover date and reports it as a percentage of the quota, with fixed or \
        dynamically generated warn and critical values.\n\n\
        Counters are read from an RTG MySQL database.",
    after_help = DYNAMIC_HELP,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Router name as recorded in RTG
    #[arg(short = 'H', long = "host", value_name = "HOSTNAME")]
    pub host: String,

    /// Interface name on that router
    #[arg(short = 'i', long = "interface", value_name = "INTERFACE")]
    pub interface: String,

    /// Day of the month the quota rolls over (1-31)
    #[arg(
        short = 'r',
        long = "rollover",
        value_name = "DAY",
        value_parser = clap::value_parser!(u8).range(1..=31)
    )]
    pub rollover: u8,

    /// Which traffic counts against the quota
    #[arg(short = 'd', long = "direction", value_enum, default_value = "both")]
    pub direction: Direction,

    /// Quota per billing period in gigabytes
    #[arg(
        short = 'q',
        long = "quota",
        value_name = "GB",
        default_value = "10000",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub quota: u32,

    /// Warning threshold: percent of quota (1-100) or 'dyn'
    #[arg(short = 'w', long = "warn", value_name = "PERCENT|dyn", default_value = "dyn")]
    pub warn: String,

    /// Critical threshold: percent of quota (1-100) or 'dyn'
    #[arg(short = 'c', long = "crit", value_name = "PERCENT|dyn", default_value = "dyn")]
    pub crit: String,

    #[command(flatten)]
    pub curves: CurveOpts,

    #[command(flatten)]
    pub db: DbOpts,

    /// Increase log verbosity on stderr (-v is taken by --version)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print help and exit
    #[arg(short = 'h', long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Print version info and exit
    #[arg(
        short = 'v',
        visible_short_alias = 'V',
        long = "version",
        action = ArgAction::Version
    )]
    pub version: Option<bool>,
}

// ── Dynamic threshold curves ─────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Dynamic thresholds")]
pub struct CurveOpts {
    /// Dynamic warn buffer percent
    #[arg(
        long = "wb",
        value_name = "PERCENT",
        default_value = "25",
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub warn_buffer: u8,

    /// Dynamic warn play percent
    #[arg(
        long = "wp",
        value_name = "PERCENT",
        default_value = "5",
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub warn_play: u8,

    /// Dynamic critical buffer percent
    #[arg(
        long = "cb",
        value_name = "PERCENT",
        default_value = "10",
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub crit_buffer: u8,

    /// Dynamic critical play percent
    #[arg(
        long = "cp",
        value_name = "PERCENT",
        default_value = "10",
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub crit_play: u8,
}

// ── Database connection ──────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Database")]
pub struct DbOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long = "config", env = "RTGQUOTA_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// RTG database host (overrides config)
    #[arg(long = "db-host", value_name = "HOST")]
    pub db_host: Option<String>,

    /// RTG database port (overrides config)
    #[arg(long = "db-port", value_name = "PORT")]
    pub db_port: Option<u16>,

    /// RTG schema name (overrides config)
    #[arg(long = "db-name", value_name = "NAME")]
    pub db_name: Option<String>,

    /// RTG database user (overrides config)
    #[arg(long = "db-user", value_name = "USER")]
    pub db_user: Option<String>,

    /// Connect timeout in seconds (overrides config)
    #[arg(long = "db-timeout", value_name = "SECONDS")]
    pub db_timeout: Option<u64>,
}

// ── Value enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Direction {
    /// Upload only (interface out-octets)
    Up,
    /// Download only (interface in-octets)
    Down,
    /// Upload plus download
    Both,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn router_host_and_db_host_are_separate() {
        let cli = Cli::try_parse_from([
            "check_rtgquota", "-H", "edge1", "-i", "eth0", "-r", "1", "--db-host", "db.example",
        ])
        .unwrap();
        assert_eq!(cli.host, "edge1");
        assert_eq!(cli.db.db_host.as_deref(), Some("db.example"));
    }

    #[test]
    fn db_host_alone_does_not_satisfy_router() {
        let err = Cli::try_parse_from([
            "check_rtgquota", "-i", "eth0", "-r", "1", "--db-host", "db.example",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
