use chrono::TimeZone;
use serde::Serialize;

use crate::{
    core::{interval::Interval, sample::Sample},
    quantity::{energy::KilowattHours, power::Watts},
    statistics::{energy, standby::StandbySplit},
};

/// Everything the report surface shows for one window of the timeline.
///
/// Derived in full from a snapshot; nothing here survives a merge.
#[derive(Serialize)]
#[must_use]
pub struct RangeReport {
    #[serde(flatten)]
    pub window: Interval,

    #[serde(rename = "sampleCount")]
    pub sample_count: usize,

    #[serde(rename = "totalKwh")]
    pub total: KilowattHours,

    #[serde(flatten)]
    pub tariff: energy::TariffUsage,

    #[serde(flatten)]
    pub standby: StandbySplit,

    #[serde(rename = "peakWatts")]
    pub peak: Option<Watts>,
}

impl RangeReport {
    /// Compute the report for the part of `samples` inside `window`.
    ///
    /// A range fetch can return a record straddling the window start, so the
    /// in-window population is re-derived here rather than assumed.
    pub fn over<Tz: TimeZone>(samples: &[Sample], window: Interval, timezone: &Tz) -> Self {
        let in_window: Vec<Sample> =
            samples.iter().copied().filter(|sample| window.contains(sample.timestamp)).collect();
        let total = energy::integrate_window(samples, window).energy;
        Self {
            window,
            sample_count: in_window.len(),
            total,
            tariff: energy::integrate_by_tariff(samples, window, timezone),
            standby: StandbySplit::estimate(&in_window, total),
            peak: in_window.iter().map(|sample| sample.power).max(),
        }
    }
}
