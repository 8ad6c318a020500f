// ── Runtime check configuration ──
//
// These types describe *what* to check and *where* the counters live.
// They never touch disk: the CLI validates its flags, resolves the config
// file, and hands fully-built values in.

use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::model::{DirectionFilter, DynamicParams, RolloverDay, ThresholdMode, Thresholds};

/// Router + interface whose counters are summed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Router name as recorded in RTG's `router` table.
    pub router: String,
    /// Interface name as recorded in RTG's `interface` table.
    pub interface: String,
}

/// Validated inputs for a single quota check.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub target: Target,
    pub direction: DirectionFilter,
    pub rollover: RolloverDay,
    /// Allowed usage per billing period, in binary gigabytes.
    pub quota_gb: u32,
    pub warn: ThresholdMode,
    pub crit: ThresholdMode,
    pub warn_curve: DynamicParams,
    pub crit_curve: DynamicParams,
}

impl CheckConfig {
    /// Check with the plugin's defaults: both directions, 10000 GB quota,
    /// dynamic thresholds on the default curves.
    pub fn new(target: Target, rollover: RolloverDay) -> Self {
        Self {
            target,
            direction: DirectionFilter::Both,
            rollover,
            quota_gb: 10_000,
            warn: ThresholdMode::Dynamic,
            crit: ThresholdMode::Dynamic,
            warn_curve: DynamicParams::WARN,
            crit_curve: DynamicParams::CRIT,
        }
    }

    /// Resolve both thresholds for `now`. Each uses its own curve.
    pub fn thresholds(&self, now: DateTime<Utc>) -> Thresholds {
        Thresholds {
            warn: self.warn.resolve(self.warn_curve, self.rollover, now),
            crit: self.crit.resolve(self.crit_curve, self.rollover, now),
        }
    }
}

/// Connection settings for the usage database.
///
/// Built by the CLI from the config file, environment, and flags.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: SecretString,
    /// Connect timeout; keeps the plugin from hanging on a dead server.
    pub timeout: Duration,
}

impl Default for SourceConfig {
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

impl From<&SourceConfig> for rtgquota_db::ConnectOptions {
    fn from(cfg: &SourceConfig) -> Self {
        Self {
            host: cfg.host.clone(),
            port: cfg.port,
            database: cfg.database.clone(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
            timeout: cfg.timeout,
        }
    }
}
