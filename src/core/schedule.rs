use crate::domain::model::iso_millis;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

pub const FIRST_HOUR_UTC: u32 = 2;
pub const SECOND_HOUR_UTC: u32 = 11;

/// Two shipment dates for tomorrow, 9 hours apart.
///
/// Both land on the same UTC date, but in zones west of UTC the first one
/// falls on the previous local day. The dates have to be in the future or
/// the API silently replaces them with the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentDates {
    pub first: DateTime<Utc>,
    pub second: DateTime<Utc>,
}

impl ShipmentDates {
    pub fn for_tomorrow(now: DateTime<Utc>) -> Self {
        let tomorrow = now
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX);

        Self {
            first: at_hour(tomorrow, FIRST_HOUR_UTC),
            second: at_hour(tomorrow, SECOND_HOUR_UTC),
        }
    }

    pub fn now() -> Self {
        Self::for_tomorrow(Utc::now())
    }

    pub fn as_array(&self) -> [DateTime<Utc>; 2] {
        [self.first, self.second]
    }

    pub fn gap(&self) -> TimeDelta {
        self.second - self.first
    }

    pub fn utc_dates_match(&self) -> bool {
        self.first.date_naive() == self.second.date_naive()
    }

    pub fn dates_diverge_in(&self, zone: Tz) -> bool {
        self.first.with_timezone(&zone).date_naive() != self.second.with_timezone(&zone).date_naive()
    }

    /// Date sent with the manifest: the last millisecond of the first date's UTC day.
    pub fn manifest_date(&self) -> DateTime<Utc> {
        end_of_day(self.first)
    }

    /// One `<utc> (<zone>)` line per date.
    pub fn describe(&self, zone: Tz) -> Vec<String> {
        self.as_array()
            .iter()
            .map(|date| format!("{} ({})", iso_millis::format(date), in_zone(*date, zone)))
            .collect()
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(time))
}

pub fn end_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    let last_ms = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&at.date_naive().and_time(last_ms))
}

pub fn in_zone(at: DateTime<Utc>, zone: Tz) -> String {
    at.with_timezone(&zone)
        .fixed_offset()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Los_Angeles;

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn worked_example() {
        let dates = ShipmentDates::for_tomorrow(utc("2024-01-01T15:00:00Z"));

        assert_eq!(dates.first, utc("2024-01-02T02:00:00Z"));
        assert_eq!(dates.second, utc("2024-01-02T11:00:00Z"));
        assert_eq!(dates.first.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        let first_local = dates.first.with_timezone(&Los_Angeles).date_naive();
        let second_local = dates.second.with_timezone(&Los_Angeles).date_naive();
        assert_eq!(first_local, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(second_local, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        assert_eq!(
            iso_millis::format(&dates.manifest_date()),
            "2024-01-02T23:59:59.999Z"
        );
    }

    #[test]
    fn invariants_hold_across_the_year() {
        // Every 7 hours for a year hits each hour of day and both DST regimes.
        let mut now = utc("2023-12-31T00:17:42.123Z");
        let end = utc("2025-01-01T00:00:00Z");
        while now < end {
            let dates = ShipmentDates::for_tomorrow(now);

            assert_eq!(dates.gap(), TimeDelta::hours(9), "at {}", now);
            assert!(dates.utc_dates_match(), "at {}", now);
            assert!(dates.first > now);
            assert_eq!(dates.first.date_naive(), now.date_naive().succ_opt().unwrap());
            assert_eq!(dates.first.timestamp_subsec_nanos(), 0);
            assert!(dates.dates_diverge_in(Los_Angeles), "at {}", now);
            assert!(!dates.dates_diverge_in(chrono_tz::UTC));

            now += TimeDelta::hours(7);
        }
    }

    #[test]
    fn describe_shows_utc_and_reference_zone() {
        let dates = ShipmentDates::for_tomorrow(utc("2024-07-10T09:30:00Z"));
        assert_eq!(
            dates.describe(Los_Angeles),
            vec![
                "2024-07-11T02:00:00.000Z (2024-07-10T19:00:00.000-07:00)".to_string(),
                "2024-07-11T11:00:00.000Z (2024-07-11T04:00:00.000-07:00)".to_string(),
            ]
        );
    }

    #[test]
    fn end_of_day_keeps_the_utc_date() {
        let late = utc("2024-02-29T23:59:59.999Z");
        assert_eq!(end_of_day(late), late);
        assert_eq!(end_of_day(utc("2024-02-29T00:00:00Z")), late);
    }
}
