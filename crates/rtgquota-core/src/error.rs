// ── Core error types ──
//
// User-facing errors from rtgquota-core. Consumers never see sqlx errors
// directly -- the `From<rtgquota_db::Error>` impl folds database failures
// into connectivity, lookup, or query variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to usage database at {target}: {reason}")]
    ConnectionFailed { target: String, reason: String },

    #[error("Usage database timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Router not found: {name}")]
    RouterNotFound { name: String },

    #[error("Interface not found: {name} on {router}")]
    InterfaceNotFound { router: String, name: String },

    // ── Query errors ─────────────────────────────────────────────────
    #[error("Usage query failed: {message}")]
    Query { message: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

// ── Conversion from data-source errors ───────────────────────────────

impl From<rtgquota_db::Error> for CoreError {
    fn from(err: rtgquota_db::Error) -> Self {
        match err {
            rtgquota_db::Error::Connection { host, port, source } => CoreError::ConnectionFailed {
                target: format!("{host}:{port}"),
                reason: source.to_string(),
            },
            rtgquota_db::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            rtgquota_db::Error::RouterNotFound { name } => CoreError::RouterNotFound { name },
            rtgquota_db::Error::InterfaceNotFound { router, name } => {
                CoreError::InterfaceNotFound { router, name }
            }
            rtgquota_db::Error::Query(e) => CoreError::Query {
                message: e.to_string(),
            },
        }
    }
}
