use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::sample::Sample;

/// The store was handed a wholesale series that is not strictly ascending.
#[derive(Debug, Error)]
#[error("series is not strictly ascending at index {index}")]
pub struct MalformedSeries {
    pub index: usize,
}

/// Canonical in-memory timeline: strictly ascending timestamps, no
/// duplicates.
///
/// The store is the sole mutation point of the series. Everything
/// downstream computes from [`SeriesStore::snapshot`] and holds no state of
/// its own.
#[derive(Default)]
#[must_use]
pub struct SeriesStore {
    samples: Vec<Sample>,
}

impl SeriesStore {
    pub const fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Timestamp of the newest stored sample: the live-poll cursor.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.last().map(|sample| sample.timestamp)
    }

    /// Immutable view for downstream computation.
    #[must_use]
    pub fn snapshot(&self) -> &[Sample] {
        &self.samples
    }

    /// Merge the newest segment of the timeline into the store.
    ///
    /// Every incoming sample at or before the last stored timestamp is
    /// dropped, so re-delivery of an overlapping polling window is a no-op
    /// and the series stays strictly ascending even when the incoming batch
    /// itself is out of order. Returns the number of accepted samples.
    pub fn append(&mut self, incoming: impl IntoIterator<Item = Sample>) -> usize {
        let mut accepted = 0;
        for sample in incoming {
            if self.last_timestamp().is_some_and(|last| sample.timestamp <= last) {
                continue;
            }
            self.samples.push(sample);
            accepted += 1;
        }
        accepted
    }

    /// Replace the whole timeline, e.g. when switching to a historical
    /// range.
    ///
    /// The replacement must already be strictly ascending; otherwise the
    /// prior state is retained and the offending index reported.
    pub fn replace(&mut self, samples: Vec<Sample>) -> Result<(), MalformedSeries> {
        if let Some(position) = samples
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(MalformedSeries { index: position + 1 });
        }
        self.samples = samples;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::power::Watts;

    fn sample(timestamp: i64, power: f64) -> Sample {
        Sample { timestamp: DateTime::from_timestamp(timestamp, 0).unwrap(), power: Watts(power) }
    }

    fn timestamps(store: &SeriesStore) -> Vec<i64> {
        store.snapshot().iter().map(|sample| sample.timestamp.timestamp()).collect()
    }

    #[test]
    fn append_is_idempotent() {
        let batch = vec![sample(100, 10.0), sample(101, 11.0), sample(102, 12.0)];
        let mut store = SeriesStore::new();
        assert_eq!(store.append(batch.clone()), 3);
        assert_eq!(store.append(batch), 0);
        assert_eq!(timestamps(&store), vec![100, 101, 102]);
    }

    #[test]
    fn append_drops_stale_samples() {
        let mut store = SeriesStore::new();
        store.append([sample(500, 1.0)]);
        store.append([sample(400, 2.0), sample(600, 3.0)]);
        assert_eq!(timestamps(&store), vec![500, 600]);
    }

    #[test]
    fn append_stays_strictly_ascending_under_overlap() {
        let mut store = SeriesStore::new();
        store.append([sample(10, 1.0), sample(11, 1.0), sample(12, 1.0)]);
        store.append([sample(11, 9.0), sample(12, 9.0), sample(13, 9.0), sample(13, 9.0)]);
        store.append([sample(9, 9.0)]);
        assert_eq!(timestamps(&store), vec![10, 11, 12, 13]);
        assert!(
            store
                .snapshot()
                .windows(2)
                .all(|pair| pair[0].timestamp < pair[1].timestamp)
        );
    }

    #[test]
    fn replace_validates_ordering() {
        let mut store = SeriesStore::new();
        store.append([sample(1, 1.0)]);
        let error = store
            .replace(vec![sample(10, 1.0), sample(10, 2.0)])
            .unwrap_err();
        assert_eq!(error.index, 1);
        // The prior state survives a rejected replacement.
        assert_eq!(timestamps(&store), vec![1]);
    }

    #[test]
    fn replace_swaps_the_timeline() {
        let mut store = SeriesStore::new();
        store.append([sample(1, 1.0)]);
        store.replace(vec![sample(50, 5.0), sample(60, 6.0)]).unwrap();
        assert_eq!(timestamps(&store), vec![50, 60]);
        assert_eq!(store.last_timestamp(), Some(DateTime::from_timestamp(60, 0).unwrap()));
    }
}
