use chrono::TimeZone;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{interval::Interval, sample::Sample, tariff::TariffPeriod},
    quantity::{energy::KilowattHours, time::Hours},
};

/// Energy over one window, recomputed from a snapshot on demand.
#[derive(Copy, Clone, Debug, Serialize)]
#[must_use]
pub struct EnergyMetric {
    #[serde(flatten)]
    pub window: Interval,

    #[serde(rename = "kwh")]
    pub energy: KilowattHours,
}

/// Day/night attribution of the integrated energy.
#[derive(Copy, Clone, Debug, Serialize)]
#[must_use]
pub struct TariffUsage {
    #[serde(rename = "dayKwh")]
    pub day: KilowattHours,

    #[serde(rename = "nightKwh")]
    pub night: KilowattHours,
}

/// Left-Riemann energy over consecutive sample pairs: the earlier sample's
/// power is held constant until the next sample arrives.
///
/// A series of zero or one samples integrates to exactly zero.
#[must_use]
pub fn integrate(samples: &[Sample]) -> KilowattHours {
    samples
        .iter()
        .tuple_windows()
        .map(|(from, to)| from.power * Hours::from(to.timestamp - from.timestamp))
        .sum()
}

/// Energy over `window` only.
///
/// A pair contributes iff its first endpoint lies inside the half-open
/// window, which keeps adjacent windows exactly additive.
pub fn integrate_window(samples: &[Sample], window: Interval) -> EnergyMetric {
    let energy = samples
        .iter()
        .tuple_windows()
        .filter(|(from, _)| window.contains(from.timestamp))
        .map(|(from, to)| from.power * Hours::from(to.timestamp - from.timestamp))
        .sum();
    EnergyMetric { window, energy }
}

/// Split the windowed energy by the tariff period of each pair's first
/// endpoint.
pub fn integrate_by_tariff<Tz: TimeZone>(
    samples: &[Sample],
    window: Interval,
    timezone: &Tz,
) -> TariffUsage {
    let mut day = KilowattHours::zero();
    let mut night = KilowattHours::zero();
    for (from, to) in samples.iter().tuple_windows() {
        if !window.contains(from.timestamp) {
            continue;
        }
        let energy = from.power * Hours::from(to.timestamp - from.timestamp);
        match TariffPeriod::of(&from.timestamp.with_timezone(timezone)) {
            TariffPeriod::Day => day += energy,
            TariffPeriod::Night => night += energy,
        }
    }
    TariffUsage { day, night }
}
