use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime, Weekday};

use crate::error::TrackerError;

/// ISO-8601 week identifier, `YYYY-Www`.
///
/// Holds the Monday of the week, so every value names a real week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey(Date);

impl WeekKey {
    pub fn monday(&self) -> Date {
        self.0
    }

    /// Monday through Sunday.
    pub fn days(&self) -> [Date; 7] {
        let mut out = [self.0; 7];
        let mut d = self.0;
        for slot in out.iter_mut().skip(1) {
            d = d.next_day().unwrap_or(d);
            *slot = d;
        }
        out
    }

    pub fn adjacent(&self, delta_weeks: i64) -> Result<Self, TrackerError> {
        delta_weeks
            .checked_mul(Duration::WEEK.whole_seconds())
            .map(Duration::seconds)
            .and_then(|shift| self.0.checked_add(shift))
            .map(week_key_of)
            .ok_or(TrackerError::WeekOutOfRange)
    }

    pub fn previous(&self) -> Result<Self, TrackerError> {
        self.adjacent(-1)
    }

    pub fn next(&self) -> Result<Self, TrackerError> {
        self.adjacent(1)
    }

    pub fn contains(&self, date: Date) -> bool {
        let offset = date - self.0;
        offset >= Duration::ZERO && offset < Duration::weeks(1)
    }
}

/// Week key of the Monday-to-Sunday span containing `date`.
pub fn week_key_of(date: Date) -> WeekKey {
    let back = date.weekday().number_days_from_monday();
    let monday = date
        .checked_sub(Duration::days(i64::from(back)))
        .unwrap_or(date);
    WeekKey(monday)
}

pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, week, _) = self.0.to_iso_week_date();
        write!(f, "{year:04}-W{week:02}")
    }
}

impl FromStr for WeekKey {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref WEEK_KEY_RE: Regex = Regex::new(r"^(\d{4})-W(\d{2})$").unwrap();
        }
        let invalid = || TrackerError::InvalidWeekKey(s.to_string());
        let caps = WEEK_KEY_RE.captures(s.trim()).ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let week: u8 = caps[2].parse().map_err(|_| invalid())?;
        Date::from_iso_week_date(year, week, Weekday::Monday)
            .map(WeekKey)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for WeekKey {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn key(s: &str) -> WeekKey {
        s.parse().expect("valid week key")
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(week_key_of(date!(2025 - 01 - 08)).to_string(), "2025-W02");
        assert_eq!(week_key_of(date!(2025 - 09 - 17)).to_string(), "2025-W38");
    }

    #[test]
    fn year_boundaries_follow_thursday_rule() {
        // Monday 2024-12-30 sits in the week holding 2025-01-02 (Thursday).
        assert_eq!(week_key_of(date!(2024 - 12 - 30)).to_string(), "2025-W01");
        assert_eq!(week_key_of(date!(2024 - 12 - 31)).to_string(), "2025-W01");
        assert_eq!(week_key_of(date!(2021 - 01 - 01)).to_string(), "2020-W53");
        assert_eq!(week_key_of(date!(2023 - 01 - 01)).to_string(), "2022-W52");
        assert_eq!(week_key_of(date!(2026 - 01 - 01)).to_string(), "2026-W01");
    }

    #[test]
    fn monday_of_key() {
        assert_eq!(key("2025-W38").monday(), date!(2025 - 09 - 15));
        assert_eq!(key("2025-W01").monday(), date!(2024 - 12 - 30));
        assert_eq!(key("2020-W53").monday(), date!(2020 - 12 - 28));
    }

    #[test]
    fn every_date_maps_into_its_own_week() {
        let mut d = date!(2018 - 12 - 24);
        let end = date!(2032 - 01 - 10);
        while d <= end {
            let k = week_key_of(d);
            assert!(k.contains(d), "{d} not inside {k}");
            assert_eq!(k.monday().weekday(), Weekday::Monday);
            assert_eq!(week_key_of(k.monday()), k);
            let reparsed: WeekKey = k.to_string().parse().expect("round trip");
            assert_eq!(reparsed, k);
            d = d.next_day().expect("in range");
        }
    }

    #[test]
    fn adjacent_rolls_over_year_end() {
        let k = key("2024-W52");
        let next = k.next().unwrap();
        assert_eq!(next.to_string(), "2025-W01");
        assert_eq!(next.previous().unwrap(), k);

        let w53 = key("2020-W53");
        assert_eq!(w53.next().unwrap().to_string(), "2021-W01");
        assert_eq!(key("2021-W01").previous().unwrap(), w53);
        assert_eq!(key("2026-W10").adjacent(-10).unwrap().to_string(), "2025-W52");
    }

    #[test]
    fn adjacent_out_of_range_is_an_error() {
        let k = key("2025-W38");
        for delta in [i64::MAX, i64::MIN, 10_000_000, -10_000_000] {
            assert!(
                matches!(k.adjacent(delta), Err(TrackerError::WeekOutOfRange)),
                "{delta}"
            );
        }
    }

    #[test]
    fn next_then_previous_is_identity() {
        let mut k = key("2019-W01");
        for _ in 0..600 {
            assert_eq!(k.next().unwrap().previous().unwrap(), k);
            k = k.next().unwrap();
        }
    }

    #[test]
    fn rejects_malformed_and_impossible_keys() {
        for bad in ["2025-38", "2025-W3", "25-W38", "2025-W00", "2025-W54", "2021-W53", "abc"] {
            assert!(bad.parse::<WeekKey>().is_err(), "{bad} should be rejected");
        }
        assert!("2020-W53".parse::<WeekKey>().is_ok());
        assert!("2026-W53".parse::<WeekKey>().is_ok());
    }

    #[test]
    fn days_span_monday_to_sunday() {
        let days = key("2025-W38").days();
        assert_eq!(days[0], date!(2025 - 09 - 15));
        assert_eq!(days[6], date!(2025 - 09 - 21));
        assert_eq!(days[6].weekday(), Weekday::Sunday);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&key("2025-W38")).unwrap();
        assert_eq!(json, "\"2025-W38\"");
        let back: WeekKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2025-W38"));
        assert!(serde_json::from_str::<WeekKey>("\"2025-W99\"").is_err());
    }
}
