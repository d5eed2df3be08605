use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::{core::sample::Sample, quantity::power::Watts};

/// One storage row holding a contiguous run of one-second readings under a
/// single sort key.
///
/// Produced by the upstream compaction writer; read-only here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[must_use]
pub struct CompactedRecord {
    #[serde(rename = "deviceKey")]
    pub device_key: String,

    /// End timestamp of the run, unix seconds.
    #[serde(rename = "sortKey")]
    pub sort_key: i64,

    /// Equal-cadence readings in chronological order.
    pub readings: Vec<Watts>,
}

impl CompactedRecord {
    /// Expand the record into its ordered run of samples.
    ///
    /// The first reading lands at `sort_key - len - 2`, every subsequent one
    /// a second later. The offset is the compaction writer's long-standing
    /// keying convention; changing it would shift every historical sample.
    ///
    /// Malformed records are not rejected here: whatever non-monotonic run
    /// they produce is dropped by the series store on merge.
    #[expect(clippy::cast_possible_wrap)]
    pub fn decode(&self) -> Vec<Sample> {
        let first_timestamp = self.sort_key - self.readings.len() as i64 - 2;
        self.readings
            .iter()
            .enumerate()
            .filter_map(|(index, &power)| {
                let timestamp = DateTime::from_timestamp(first_timestamp + index as i64, 0)?;
                Some(Sample { timestamp, power })
            })
            .collect()
    }
}
