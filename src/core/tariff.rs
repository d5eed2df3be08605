use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

/// Billing period of a single instant.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum TariffPeriod {
    Day,
    Night,
}

impl TariffPeriod {
    /// Classify a timestamp resolved to the device's local timezone.
    ///
    /// The night rate covers 21:00-05:59 local plus all of Saturday and
    /// Sunday.
    pub fn of<Tz: TimeZone>(local_time: &DateTime<Tz>) -> Self {
        let hour = local_time.hour();
        if (21..=23).contains(&hour) || hour <= 5 {
            return Self::Night;
        }
        if matches!(local_time.weekday(), Weekday::Sat | Weekday::Sun) {
            return Self::Night;
        }
        Self::Day
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn weekday_afternoon_is_day() {
        // Tuesday.
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 14, 0, 0).unwrap();
        assert_eq!(TariffPeriod::of(&timestamp), TariffPeriod::Day);
    }

    #[test]
    fn weekday_late_evening_is_night() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 22, 0, 0).unwrap();
        assert_eq!(TariffPeriod::of(&timestamp), TariffPeriod::Night);
    }

    #[test]
    fn weekday_early_morning_is_night() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 0, 0).unwrap();
        assert_eq!(TariffPeriod::of(&timestamp), TariffPeriod::Night);
    }

    #[test]
    fn saturday_afternoon_is_night() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 6, 14, 0, 0).unwrap();
        assert_eq!(TariffPeriod::of(&timestamp), TariffPeriod::Night);
    }

    #[test]
    fn night_rate_boundaries() {
        let morning_end = Utc.with_ymd_and_hms(2024, 1, 2, 6, 0, 0).unwrap();
        assert_eq!(TariffPeriod::of(&morning_end), TariffPeriod::Day);
        let evening_start = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
        assert_eq!(TariffPeriod::of(&evening_start), TariffPeriod::Night);
    }
}
