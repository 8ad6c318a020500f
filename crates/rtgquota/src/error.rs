//! CLI error types with miette diagnostics.
//!
//! Every failure is reported as a single `UNKNOWN:` line on stdout; the
//! diagnostic codes and help text show up in the full report on stderr
//! with `--verbose`.

use miette::Diagnostic;
use thiserror::Error;

use rtgquota_config::ConfigError;
use rtgquota_core::CoreError;

/// Nagios plugin exit codes used outside of a completed check.
pub mod exit_code {
    /// Usage errors, help/version output, and failed checks.
    pub const UNKNOWN: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(rtgquota::validation),
        help("Run: check_rtgquota --help")
    )]
    Validation { field: String, reason: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to RTG database at {target}: {reason}")]
    #[diagnostic(
        code(rtgquota::connection_failed),
        help(
            "Check that MySQL is running and reachable.\n\
             Override the target with --db-host / --db-port or set [database] in the config file."
        )
    )]
    ConnectionFailed { target: String, reason: String },

    #[error("RTG database timed out after {seconds}s")]
    #[diagnostic(
        code(rtgquota::timeout),
        help("Increase the timeout with --db-timeout or check database responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Lookup ───────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found in RTG")]
    #[diagnostic(
        code(rtgquota::not_found),
        help("Names must match the `router` / `interface` tables exactly.")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("Interface '{name}' on '{router}' not found in RTG")]
    #[diagnostic(
        code(rtgquota::interface_not_found),
        help("Interface names are per router; check the `interface` rows for this router's rid.")
    )]
    InterfaceNotFound { router: String, name: String },

    #[error("RTG query failed: {message}")]
    #[diagnostic(code(rtgquota::query))]
    Query { message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No database password configured for {account}")]
    #[diagnostic(
        code(rtgquota::no_credentials),
        help(
            "Set RTGQUOTA_DATABASE_PASSWORD, store it in the keyring under service \
             'rtgquota' / account '{account}', or add `password` to [database]."
        )
    )]
    NoCredentials { account: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(rtgquota::config))]
    Config { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    ///
    /// Nagios has a single bucket for "the check itself could not run".
    #[allow(clippy::unused_self)]
    pub fn exit_code(&self) -> i32 {
        exit_code::UNKNOWN
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { username, host } => CliError::NoCredentials {
                account: format!("{username}@{host}"),
            },
            ConfigError::Figment(e) => CliError::Config {
                message: e.to_string(),
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { target, reason } => {
                CliError::ConnectionFailed { target, reason }
            }

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::RouterNotFound { name } => CliError::NotFound {
                resource_type: "Router".into(),
                identifier: name,
            },

            CoreError::InterfaceNotFound { router, name } => {
                CliError::InterfaceNotFound { router, name }
            }

            CoreError::Query { message } => CliError::Query { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
        }
    }
}
