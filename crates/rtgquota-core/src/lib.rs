//! Quota logic for the `check_rtgquota` monitoring plugin.
//!
//! Everything here is pure computation except [`check`], which drives a
//! [`UsageSource`] to fetch byte counters:
//!
//! - **[`rollover`]**: locates the most recent billing rollover for a
//!   day-of-month anchor.
//! - **[`threshold`]**: the dynamic warn/critical curve that rises linearly
//!   from `play` to `100 - buffer` across the billing period.
//! - **[`evaluate`]**: turns byte totals, quota and thresholds into a
//!   Nagios status, status line and performance data.
//! - **[`check`]**: wires the three together against a data source.

pub mod check;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod rollover;
pub mod source;
pub mod threshold;

// ── Primary re-exports ──────────────────────────────────────────────
pub use check::run_check;
pub use config::{CheckConfig, SourceConfig, Target};
pub use error::CoreError;
pub use evaluate::{Evaluation, PerfData, evaluate};
pub use model::{
    DirectionFilter, DynamicParams, RolloverDay, Status, ThresholdMode, Thresholds,
    TrafficDirection, UsageTotals,
};
pub use rollover::last_rollover;
pub use source::{UsageSource, connect};
pub use threshold::dynamic_threshold;
