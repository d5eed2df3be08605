use chrono::{DateTime, Utc};

use crate::{
    core::{interval::Interval, record::CompactedRecord, sample::Sample},
    db::Db,
    prelude::*,
};

/// The two query shapes the storage collaborator answers.
#[derive(Copy, Clone, Debug)]
pub enum ReadingsQuery {
    /// Live tail: everything strictly after the cursor.
    Since(DateTime<Utc>),

    /// Absolute window, e.g. "yesterday" or a custom report.
    Range(Interval),
}

/// Resolves readings queries against the backing store and returns decoded
/// series.
///
/// Backend failures are flattened to an empty series at this boundary:
/// callers render "no series" uniformly, and operators tell a fault from a
/// legitimately empty range by the error log emitted here.
#[must_use]
pub struct Readings {
    db: Db,
    device_id: String,
}

impl Readings {
    pub const fn new(db: Db, device_id: String) -> Self {
        Self { db, device_id }
    }

    /// Fetch and decode the samples for the query; never fails.
    pub async fn fetch(&self, query: ReadingsQuery) -> Vec<Sample> {
        match self.try_fetch(query).await {
            Ok(samples) => {
                if samples.is_empty() {
                    info!(?query, "no data in range");
                }
                samples
            }
            Err(error) => {
                error!(?query, "backend unavailable: {error:#}");
                Vec::new()
            }
        }
    }

    /// The typed path: `Ok` with an empty vec is a confirmed-empty range,
    /// `Err` is a backend fault.
    async fn try_fetch(&self, query: ReadingsQuery) -> Result<Vec<Sample>> {
        let records = match query {
            ReadingsQuery::Since(cursor) => {
                self.db.records().tail(&self.device_id, cursor).await?
            }
            ReadingsQuery::Range(interval) => {
                self.db.records().range(&self.device_id, interval).await?
            }
        };
        Ok(decode_records(&records))
    }
}

/// Concatenate the decoded runs in storage order; the store's ascending key
/// order makes the result ascending by construction.
fn decode_records(records: &[CompactedRecord]) -> Vec<Sample> {
    records.iter().flat_map(CompactedRecord::decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::power::Watts;

    fn record(sort_key: i64, readings: &[f64]) -> CompactedRecord {
        CompactedRecord {
            device_key: "reading-test".to_string(),
            sort_key,
            readings: readings.iter().copied().map(Watts).collect(),
        }
    }

    #[test]
    fn decoded_records_concatenate_in_storage_order() {
        let records = [record(1000, &[50.0, 60.0, 55.0]), record(1006, &[70.0, 80.0, 90.0])];
        let timestamps: Vec<i64> =
            decode_records(&records).iter().map(|sample| sample.timestamp.timestamp()).collect();
        assert_eq!(timestamps, vec![995, 996, 997, 1001, 1002, 1003]);
    }
}
