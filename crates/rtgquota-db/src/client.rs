// RTG MySQL client
//
// Wraps a small `sqlx::MySqlPool` with the three queries the quota check
// needs: router lookup, interface lookup, and a counter sum over one of the
// per-router octet tables.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tracing::{debug, trace};

use crate::error::Error;

/// Connection parameters for the RTG database.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    /// Schema name (RTG's default is `rtg`).
    pub database: String,
    pub username: String,
    pub password: SecretString,
    /// Upper bound on establishing a connection.
    pub timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3306,
            database: "rtg".into(),
            username: "rtg".into(),
            password: SecretString::from(String::new()),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Which per-router counter table to sum.
///
/// RTG names the tables from the router's point of view: `ifOutOctets` is
/// traffic the interface sent (upload), `ifInOctets` is traffic it received
/// (download).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTable {
    InOctets,
    OutOctets,
}

impl CounterTable {
    /// Table name for the given router id, e.g. `ifOutOctets_12`.
    pub fn table_name(self, rid: i64) -> String {
        match self {
            Self::InOctets => format!("ifInOctets_{rid}"),
            Self::OutOctets => format!("ifOutOctets_{rid}"),
        }
    }

    /// `SELECT` summing `counter` for one interface newer than a unix timestamp.
    ///
    /// The router id is interpolated into the table name (it comes from the
    /// `router` table, never from user input); everything else is bound.
    pub fn sum_query(self, rid: i64) -> String {
        format!(
            "SELECT CAST(COALESCE(SUM(`counter`), 0) AS UNSIGNED) FROM `{}` \
             WHERE id = ? AND UNIX_TIMESTAMP(`dtime`) > ?",
            self.table_name(rid)
        )
    }
}

/// Resolved identity of an interface: router id plus interface id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceRef {
    pub rid: i64,
    pub id: i64,
}

/// Client for the RTG schema.
pub struct RtgClient {
    pool: MySqlPool,
    timeout: Duration,
}

impl RtgClient {
    /// Open a pool against the RTG database.
    ///
    /// Fails fast: at most `options.timeout` is spent establishing the first
    /// connection.
    pub async fn connect(options: &ConnectOptions) -> Result<Self, Error> {
        debug!(
            host = %options.host,
            port = options.port,
            database = %options.database,
            "connecting to RTG database"
        );

        let connect = MySqlConnectOptions::new()
            .host(&options.host)
            .port(options.port)
            .username(&options.username)
            .password(options.password.expose_secret())
            .database(&options.database);

        // Two connections so the up and down sums can run side by side.
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(options.timeout)
            .connect_with(connect)
            .await
            .map_err(|e| match e {
                sqlx::Error::PoolTimedOut => Error::Timeout {
                    timeout_secs: options.timeout.as_secs(),
                },
                other => Error::Connection {
                    host: options.host.clone(),
                    port: options.port,
                    source: other,
                },
            })?;

        Ok(Self {
            pool,
            timeout: options.timeout,
        })
    }

    /// Look up a router's `rid` by its name.
    pub async fn router_id(&self, name: &str) -> Result<i64, Error> {
        trace!(name, "looking up router id");
        let rid: Option<i64> =
            sqlx::query_scalar("SELECT CAST(rid AS SIGNED) FROM router WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| self.query_error(e))?;

        rid.ok_or_else(|| Error::RouterNotFound { name: name.into() })
    }

    /// Look up an interface's `id` on a known router.
    ///
    /// `router` is only used to label the not-found error.
    pub async fn interface_id(&self, rid: i64, router: &str, name: &str) -> Result<i64, Error> {
        trace!(rid, name, "looking up interface id");
        let id: Option<i64> = sqlx::query_scalar(
            "SELECT CAST(id AS SIGNED) FROM interface WHERE rid = ? AND name = ?",
        )
        .bind(rid)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| self.query_error(e))?;

        id.ok_or_else(|| Error::InterfaceNotFound {
            router: router.into(),
            name: name.into(),
        })
    }

    /// Two-step identity lookup: router name → rid → interface id.
    pub async fn resolve(&self, router: &str, interface: &str) -> Result<InterfaceRef, Error> {
        let rid = self.router_id(router).await?;
        let id = self.interface_id(rid, router, interface).await?;
        debug!(router, interface, rid, id, "resolved interface");
        Ok(InterfaceRef { rid, id })
    }

    /// Sum the byte counters of one interface recorded after `since`
    /// (unix seconds). An interface with no samples sums to zero.
    pub async fn sum_counter(
        &self,
        iface: InterfaceRef,
        table: CounterTable,
        since: i64,
    ) -> Result<u64, Error> {
        let sql = table.sum_query(iface.rid);
        trace!(%sql, id = iface.id, since, "summing counters");

        let bytes: u64 = sqlx::query_scalar(&sql)
            .bind(iface.id)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.query_error(e))?;

        debug!(table = ?table, id = iface.id, bytes, "counter sum");
        Ok(bytes)
    }

    /// Resolve `router`/`interface` and sum one counter table since `since`.
    pub async fn fetch_sum(
        &self,
        router: &str,
        interface: &str,
        table: CounterTable,
        since: i64,
    ) -> Result<u64, Error> {
        let iface = self.resolve(router, interface).await?;
        self.sum_counter(iface, table, since).await
    }

    /// Close the pool, waiting for open connections to shut down.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn query_error(&self, err: sqlx::Error) -> Error {
        match err {
            sqlx::Error::PoolTimedOut => Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            },
            other => Error::Query(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_follow_rtg_convention() {
        assert_eq!(CounterTable::OutOctets.table_name(7), "ifOutOctets_7");
        assert_eq!(CounterTable::InOctets.table_name(12), "ifInOctets_12");
    }

    #[test]
    fn sum_query_binds_interface_and_timestamp() {
        let sql = CounterTable::InOctets.sum_query(3);
        assert!(sql.contains("FROM `ifInOctets_3`"));
        assert!(sql.contains("COALESCE(SUM(`counter`), 0)"));
        assert_eq!(sql.matches('?').count(), 2);
    }

    #[test]
    fn default_options_match_rtg_install() {
        let opts = ConnectOptions::default();
        assert_eq!(opts.database, "rtg");
        assert_eq!(opts.port, 3306);
        assert_eq!(opts.timeout, Duration::from_secs(5));
    }
}
