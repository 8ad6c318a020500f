//! Quota evaluation: byte totals in, Nagios status line out.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{Status, Thresholds, UsageTotals};

/// Binary gigabyte (1024³ bytes).
pub const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Performance data appended after the `|` of the status line, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfData {
    pub used: u64,
    pub quota: u64,
    pub warn: i64,
    pub crit: i64,
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "used={};quota={};warn={};crit={};",
            self.used, self.quota, self.warn, self.crit
        )
    }
}

/// Outcome of one quota check.
///
/// Figures are kept unrounded; rounding happens when the status line is
/// rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub status: Status,
    /// Start of the current billing period.
    pub since: NaiveDate,
    pub percentage: f64,
    pub used_gb: f64,
    pub up_gb: f64,
    pub down_gb: f64,
    pub quota_gb: f64,
    pub thresholds: Thresholds,
    pub perf: PerfData,
}

impl Evaluation {
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Since {} this server has used {}% of its quota ({}/{} GB, {} GB down, {} GB up).  \
             Warn at {}%, Critical at {}%. | {}",
            self.status,
            self.since.format("%Y-%m-%d"),
            self.percentage.round(),
            self.used_gb.round(),
            self.quota_gb,
            self.down_gb.round(),
            self.up_gb.round(),
            self.thresholds.warn,
            self.thresholds.crit,
            self.perf,
        )
    }
}

/// Classify a usage percentage against warn/critical thresholds.
///
/// Both comparisons are strict, so usage exactly at a threshold stays in
/// the lower band. The final arm is only reachable for NaN.
pub fn classify(percentage: f64, warn: f64, crit: f64) -> Status {
    if percentage > crit {
        Status::Critical
    } else if percentage > warn {
        Status::Warning
    } else if percentage <= warn {
        Status::Ok
    } else {
        Status::Unknown
    }
}

/// Evaluate usage since `rollover` against a quota of `quota_gb` binary GB.
///
/// A quota that is zero, negative, or not finite yields `UNKNOWN` rather
/// than dividing by it.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn evaluate(
    totals: UsageTotals,
    quota_gb: f64,
    thresholds: Thresholds,
    rollover: DateTime<Utc>,
) -> Evaluation {
    let up_gb = totals.up as f64 / BYTES_PER_GB;
    let down_gb = totals.down as f64 / BYTES_PER_GB;
    let used_gb = up_gb + down_gb;
    let percentage = used_gb / quota_gb * 100.0;

    let warn = f64::from(thresholds.warn);
    let crit = f64::from(thresholds.crit);

    let status = if quota_gb.is_finite() && quota_gb > 0.0 {
        classify(percentage, warn, crit)
    } else {
        Status::Unknown
    };

    let quota_bytes = quota_gb * BYTES_PER_GB;
    let perf = PerfData {
        used: totals.total(),
        quota: quota_bytes.round() as u64,
        warn: (warn / 100.0 * quota_bytes).round() as i64,
        crit: (crit / 100.0 * quota_bytes).round() as i64,
    };

    tracing::debug!(
        %status,
        percentage,
        used_gb,
        quota_gb,
        warn = thresholds.warn,
        crit = thresholds.crit,
        "evaluated usage"
    );

    Evaluation {
        status,
        since: rollover.date_naive(),
        percentage,
        used_gb,
        up_gb,
        down_gb,
        quota_gb,
        thresholds,
        perf,
    }
}
