use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// Parses the `DD/MM/YYYY` dates used throughout the roster export.
///
/// Exactly three `/`-separated numeric components are required. Anything
/// else, including impossible calendar dates such as `31/02/2024`, yields
/// `None`. They are never rolled over into the following month
/// (`31/02/2024` does not become `02/03/2024`), so such rows count as undated.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let mut parts = raw.split('/');
    let day = numeric_component(parts.next())?;
    let month = numeric_component(parts.next())?;
    let year = numeric_component(parts.next())?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn numeric_component(part: Option<&str>) -> Option<u32> {
    let part = part?.trim();
    if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Whole days from `from` to `to`, floored like a millisecond difference
/// divided by the length of a day.
pub fn whole_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Calendar month used as the sort key of every monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// `JAN/2024` style label. Derived from the key, never the other way round.
    pub fn label(self) -> String {
        let index = self.month.clamp(1, 12) as usize - 1;
        format!("{}/{:04}", MONTH_ABBREVIATIONS[index], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_month_year() {
        let date = parse_date(Some("05/09/2024")).expect("valid date");
        assert_eq!(date.day(), 5);
        assert_eq!(date.month0(), 8);
        assert_eq!(date.year(), 2024);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_date(Some("2024/09/05")).is_none());
        assert!(parse_date(Some("05-09-2024")).is_none());
        assert!(parse_date(Some("")).is_none());
        assert!(parse_date(None).is_none());
        assert!(parse_date(Some("05/09")).is_none());
        assert!(parse_date(Some("05/09/2024/1")).is_none());
        assert!(parse_date(Some("aa/09/2024")).is_none());
        assert!(parse_date(Some("//2024")).is_none());
        assert!(parse_date(Some("31/02/2024")).is_none());
    }

    #[test]
    fn labels_follow_the_key() {
        let january = YearMonth::of(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let february = YearMonth::of(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let next_january = YearMonth::of(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(january.label(), "JAN/2024");
        assert_eq!(february.label(), "FEV/2024");
        assert_eq!(next_january.label(), "JAN/2025");
        assert!(january < february && february < next_january);
        assert_eq!(january.to_string(), "2024-01");
    }

    #[test]
    fn whole_days_floor_partial_days() {
        let from = start_of_day(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let to = NaiveDate::from_ymd_opt(2024, 1, 12)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(whole_days_between(from, to), 2);
        assert_eq!(whole_days_between(to, from), -3);
    }
}
