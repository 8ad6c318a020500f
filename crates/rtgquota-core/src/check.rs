//! One complete quota check: rollover → thresholds → fetch → evaluate.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::{CheckConfig, Target};
use crate::error::CoreError;
use crate::evaluate::{Evaluation, evaluate};
use crate::model::{DirectionFilter, TrafficDirection, UsageTotals};
use crate::rollover::last_rollover;
use crate::source::UsageSource;

/// Run the check described by `config` against `source` as of `now`.
///
/// Directions excluded by `config.direction` are never fetched and count
/// as zero. When both are requested the two sums run concurrently.
pub async fn run_check<S>(
    source: &S,
    config: &CheckConfig,
    now: DateTime<Utc>,
) -> Result<Evaluation, CoreError>
where
    S: UsageSource + Sync,
{
    let rollover = last_rollover(config.rollover, now);
    let thresholds = config.thresholds(now);
    debug!(
        anchor = %config.rollover,
        %rollover,
        warn = thresholds.warn,
        crit = thresholds.crit,
        "resolved billing period"
    );

    let totals = fetch_totals(source, &config.target, config.direction, rollover).await?;
    debug!(up = totals.up, down = totals.down, "fetched usage");

    Ok(evaluate(
        totals,
        f64::from(config.quota_gb),
        thresholds,
        rollover,
    ))
}

async fn fetch_totals<S>(
    source: &S,
    target: &Target,
    direction: DirectionFilter,
    since: DateTime<Utc>,
) -> Result<UsageTotals, CoreError>
where
    S: UsageSource + Sync,
{
    let fetch = move |leg: TrafficDirection| async move {
        if direction.includes(leg) {
            source.fetch_sum(target, leg, since).await
        } else {
            Ok(0)
        }
    };

    let (up, down) = tokio::try_join!(fetch(TrafficDirection::Up), fetch(TrafficDirection::Down))?;
    Ok(UsageTotals { up, down })
}
