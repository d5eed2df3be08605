use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Days, Local, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use serde_with::{TimestampSeconds, serde_as};

use crate::prelude::*;

/// Half-open time window: `start` inclusive, `end` exclusive.
#[serde_as]
#[derive(Copy, Clone, Eq, PartialEq, Serialize)]
#[must_use]
pub struct Interval {
    #[serde_as(as = "TimestampSeconds<i64>")]
    #[serde(rename = "windowStart")]
    pub start: DateTime<Utc>,

    #[serde_as(as = "TimestampSeconds<i64>")]
    #[serde(rename = "windowEnd")]
    pub end: DateTime<Utc>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Yesterday's full local day.
    pub fn yesterday() -> Result<Self> {
        let today = local_midnight()?;
        let yesterday = today.checked_sub_days(Days::new(1)).context("date out of range")?;
        Ok(Self::new(yesterday, today))
    }

    /// Local midnight up to now.
    pub fn today_so_far() -> Result<Self> {
        Ok(Self::new(local_midnight()?, Utc::now()))
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, timestamp: DateTime<Utc>) -> bool {
        (self.start <= timestamp) && (timestamp < self.end)
    }
}

fn local_midnight() -> Result<DateTime<Utc>> {
    Local::now()
        .with_time(NaiveTime::MIN)
        .single()
        .context("local midnight is ambiguous")
        .map(|midnight| midnight.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let interval = Interval::new(
            DateTime::from_timestamp(100, 0).unwrap(),
            DateTime::from_timestamp(200, 0).unwrap(),
        );
        assert!(interval.contains(DateTime::from_timestamp(100, 0).unwrap()));
        assert!(interval.contains(DateTime::from_timestamp(199, 0).unwrap()));
        assert!(!interval.contains(DateTime::from_timestamp(200, 0).unwrap()));
        assert!(!interval.contains(DateTime::from_timestamp(99, 0).unwrap()));
    }

    #[test]
    fn yesterday_is_one_local_day() {
        let interval = Interval::yesterday().unwrap();
        // Bounded at local midnights, so a DST-change day is 23 or 25 hours.
        assert!(interval.duration() >= TimeDelta::hours(23));
        assert!(interval.duration() <= TimeDelta::hours(25));
        assert!(interval.end <= Utc::now());
    }
}
