use bson::{Document, doc};
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};

use crate::{
    core::{interval::Interval, record::CompactedRecord},
    prelude::*,
};

/// Read-only view over the compacted readings collection.
///
/// Rows are keyed `reading-<device-id>` and sorted by `sortKey`, the end
/// timestamp of each compacted run.
#[must_use]
pub struct Records(Collection<CompactedRecord>);

impl Records {
    const COLLECTION_NAME: &'static str = "compactedReadings";

    pub(super) fn new(database: &Database) -> Self {
        Self(database.collection(Self::COLLECTION_NAME))
    }

    /// Records strictly after the cursor, oldest first: the live tail.
    #[instrument(skip_all, fields(device_id = device_id, since = %since))]
    pub async fn tail(
        &self,
        device_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<CompactedRecord>> {
        info!("querying the live tail…");
        self.find(doc! {
            "deviceKey": reading_key(device_id),
            "sortKey": { "$gt": since.timestamp() },
        })
        .await
    }

    /// Records whose sort key falls within the interval, oldest first.
    ///
    /// The end bound is inclusive: a record keyed exactly at the window end
    /// still holds samples from before it.
    #[instrument(skip_all, fields(device_id = device_id, interval = ?interval))]
    pub async fn range(
        &self,
        device_id: &str,
        interval: Interval,
    ) -> Result<Vec<CompactedRecord>> {
        info!("querying the range…");
        self.find(doc! {
            "deviceKey": reading_key(device_id),
            "sortKey": {
                "$gte": interval.start.timestamp(),
                "$lte": interval.end.timestamp(),
            },
        })
        .await
    }

    async fn find(&self, filter: Document) -> Result<Vec<CompactedRecord>> {
        self.0
            .find(filter)
            .sort(doc! { "sortKey": 1 })
            .await
            .context("failed to query the compacted readings")?
            .try_collect()
            .await
            .context("failed to read the compacted readings")
    }
}

/// Reading rows carry a `reading-` key prefix per device.
fn reading_key(device_id: &str) -> String {
    format!("reading-{device_id}")
}
