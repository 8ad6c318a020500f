// ── Usage data source ──
//
// The check only needs one primitive from its backing store: "how many
// bytes crossed this interface in this direction since T". RTG is the
// production backend; tests plug in an in-memory map.

use std::future::Future;

use chrono::{DateTime, Utc};
use rtgquota_db::{ConnectOptions, RtgClient};

use crate::config::{SourceConfig, Target};
use crate::error::CoreError;
use crate::model::TrafficDirection;

/// Summed byte counters for a router interface.
///
/// Implementations resolve the target's identity before summing and must
/// report a missing router or interface as an error, never as zero.
pub trait UsageSource {
    fn fetch_sum(
        &self,
        target: &Target,
        direction: TrafficDirection,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

impl UsageSource for RtgClient {
    async fn fetch_sum(
        &self,
        target: &Target,
        direction: TrafficDirection,
        since: DateTime<Utc>,
    ) -> Result<u64, CoreError> {
        let bytes = RtgClient::fetch_sum(
            self,
            &target.router,
            &target.interface,
            direction.counter_table(),
            since.timestamp(),
        )
        .await?;
        Ok(bytes)
    }
}

/// Open the RTG database described by `config`.
pub async fn connect(config: &SourceConfig) -> Result<RtgClient, CoreError> {
    let options = ConnectOptions::from(config);
    Ok(RtgClient::connect(&options).await?)
}
