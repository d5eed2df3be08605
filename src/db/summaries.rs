use bson::doc;
use chrono::{DateTime, TimeDelta, Utc};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};
use serde::Deserialize;
use serde_with::{TimestampSeconds, serde_as};

use crate::{prelude::*, quantity::energy::KilowattHours};

/// One day's precomputed day/night usage rollup.
#[serde_as]
#[derive(Copy, Clone, Debug, Deserialize)]
#[must_use]
pub struct DailySummary {
    /// Midnight of the summarized day, unix seconds.
    #[serde_as(as = "TimestampSeconds<i64>")]
    #[serde(rename = "sortKey")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "dayUse")]
    pub day_use: KilowattHours,

    #[serde(rename = "nightUse")]
    pub night_use: KilowattHours,
}

/// Read-only view over the daily summary rollups.
#[must_use]
pub struct Summaries(Collection<DailySummary>);

impl Summaries {
    const COLLECTION_NAME: &'static str = "dailySummaries";

    pub(super) fn new(database: &Database) -> Self {
        Self(database.collection(Self::COLLECTION_NAME))
    }

    /// Summaries for the trailing `days`, oldest first.
    #[instrument(skip_all, fields(device_id = device_id, days = days))]
    pub async fn trailing(&self, device_id: &str, days: u16) -> Result<Vec<DailySummary>> {
        info!("querying the daily summaries…");
        let since = Utc::now() - TimeDelta::days(i64::from(days));
        self.0
            .find(doc! {
                "deviceKey": summary_key(device_id),
                "sortKey": { "$gte": since.timestamp() },
            })
            .sort(doc! { "sortKey": 1 })
            .await
            .context("failed to query the daily summaries")?
            .try_collect()
            .await
            .context("failed to read the daily summaries")
    }
}

/// Summary rows carry a `summary-day-` key prefix per device.
fn summary_key(device_id: &str) -> String {
    format!("summary-day-{device_id}")
}
