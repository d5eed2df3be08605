use std::cmp::Reverse;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::sample::Sample,
    quantity::{energy::KilowattHours, power::Watts, time::Hours},
};

/// Active/standby attribution of a series' total energy.
///
/// The standby baseline is the modal watt reading: an idle household spends
/// more wall-clock time at its one recurring low-power level than at any
/// other single value.
#[derive(Copy, Clone, Debug, Serialize)]
#[must_use]
pub struct StandbySplit {
    #[serde(rename = "standbyWatts")]
    pub standby_power: Watts,

    #[serde(rename = "activeKwh")]
    pub active: KilowattHours,

    #[serde(rename = "standbyKwh")]
    pub standby: KilowattHours,
}

impl StandbySplit {
    /// Split `total` between standby and active load.
    ///
    /// With fewer than two samples there is no baseline: the split reports
    /// 0 W and attributes all energy to active load.
    pub fn estimate(samples: &[Sample], total: KilowattHours) -> Self {
        let (Some(standby_power), [first, .., last]) = (modal_power(samples), samples) else {
            return Self {
                standby_power: Watts::zero(),
                active: total,
                standby: KilowattHours::zero(),
            };
        };
        let standby = standby_power * Hours::from(last.timestamp - first.timestamp);
        Self { standby_power, active: total - standby, standby }
    }
}

/// Most frequent reading; ties go to the lower value.
fn modal_power(samples: &[Sample]) -> Option<Watts> {
    samples
        .iter()
        .map(|sample| sample.power)
        .sorted_unstable()
        .dedup_with_count()
        .min_by_key(|&(count, power)| (Reverse(count), power))
        .map(|(_, power)| power)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::DateTime;

    use super::*;
    use crate::statistics::energy;

    fn sample(timestamp: i64, power: f64) -> Sample {
        Sample { timestamp: DateTime::from_timestamp(timestamp, 0).unwrap(), power: Watts(power) }
    }

    #[test]
    fn split_conserves_the_total() {
        let series: Vec<Sample> = [50.0, 50.0, 400.0, 50.0, 220.0]
            .iter()
            .enumerate()
            .map(|(index, &power)| sample(index as i64 * 3600, power))
            .collect();
        let total = energy::integrate(&series);
        let split = StandbySplit::estimate(&series, total);
        assert_abs_diff_eq!(split.standby_power.0, 50.0);
        assert_abs_diff_eq!((split.active + split.standby).0, total.0);
    }

    #[test]
    fn baseline_is_the_mode() {
        // 50 W is most frequent even though 10 W is the minimum.
        let series: Vec<Sample> = [10.0, 50.0, 50.0, 50.0, 900.0]
            .iter()
            .enumerate()
            .map(|(index, &power)| sample(index as i64, power))
            .collect();
        let split = StandbySplit::estimate(&series, energy::integrate(&series));
        assert_abs_diff_eq!(split.standby_power.0, 50.0);
    }

    #[test]
    fn mode_ties_break_low() {
        let series: Vec<Sample> = [80.0, 30.0, 80.0, 30.0]
            .iter()
            .enumerate()
            .map(|(index, &power)| sample(index as i64, power))
            .collect();
        let split = StandbySplit::estimate(&series, energy::integrate(&series));
        assert_abs_diff_eq!(split.standby_power.0, 30.0);
    }

    #[test]
    fn degenerate_series_report_no_baseline() {
        let total = KilowattHours(1.5);
        let split = StandbySplit::estimate(&[sample(0, 75.0)], total);
        assert_abs_diff_eq!(split.standby_power.0, 0.0);
        assert_abs_diff_eq!(split.active.0, total.0);
        assert_abs_diff_eq!(split.standby.0, 0.0);
    }

    #[test]
    fn standby_energy_scales_with_elapsed_time() {
        // 100 W baseline held over two hours is 0.2 kWh.
        let series =
            [sample(0, 100.0), sample(3600, 100.0), sample(7200, 300.0)];
        let split = StandbySplit::estimate(&series, energy::integrate(&series));
        assert_abs_diff_eq!(split.standby.0, 0.2);
    }
}
