use thiserror::Error;

/// Top-level error type for the `rtgquota-db` crate.
///
/// Keeps "the database is unreachable" apart from "the database answered,
/// but the router or interface isn't there". An empty counter sum is not
/// an error at all -- it is legitimately zero traffic.
#[derive(Debug, Error)]
pub enum Error {
    // ── Connectivity ────────────────────────────────────────────────
    /// The MySQL server refused or dropped the connection.
    #[error("Cannot connect to RTG database at {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },

    /// No connection could be established within the configured timeout.
    #[error("RTG database did not respond within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Identity lookup ─────────────────────────────────────────────
    /// No `router` row matches the given name.
    #[error("Router '{name}' not found in RTG database")]
    RouterNotFound { name: String },

    /// The router exists but has no `interface` row with this name.
    #[error("Interface '{name}' not found on router '{router}'")]
    InterfaceNotFound { router: String, name: String },

    // ── Query ───────────────────────────────────────────────────────
    /// A statement failed after the connection was established.
    #[error("RTG query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl Error {
    /// Returns `true` if the error came from the lookup step rather than
    /// from the connection or a query.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RouterNotFound { .. } | Self::InterfaceNotFound { .. }
        )
    }

    /// Returns `true` if this is a connectivity failure (refused, reset, or
    /// timed out).
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }
}
