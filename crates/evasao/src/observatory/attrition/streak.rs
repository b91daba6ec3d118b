use super::domain::Classified;
use crate::observatory::dataset::AuditorRecord;
use crate::observatory::dates::{parse_date, start_of_day, whole_days_between};
use chrono::{NaiveDate, NaiveDateTime};

/// Publication dates of every attrition and inactivity act, oldest first.
pub fn publication_dates<'a, I>(records: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    let mut dates: Vec<NaiveDate> = records
        .into_iter()
        .filter_map(|record| parse_date(record.publication_date()))
        .collect();
    dates.sort_unstable();
    dates
}

/// Longest run, in whole days, between consecutive publications.
///
/// With a single publication the run is still open and is measured up to
/// `now`.
pub fn longest_streak_days<'a, I>(records: I, now: NaiveDateTime) -> i64
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    let dates = publication_dates(records);
    match dates.as_slice() {
        [] => 0,
        [only] => whole_days_between(start_of_day(*only), now),
        _ => dates
            .windows(2)
            .map(|pair| whole_days_between(start_of_day(pair[0]), start_of_day(pair[1])))
            .max()
            .unwrap_or(0),
    }
}

/// Most recent publication, if any.
pub fn last_publication<'a, I>(records: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    publication_dates(records).last().copied()
}

/// Whole days since the most recent publication, measured from `fallback`
/// when the records carry none.
pub fn days_since_last_event<'a, I>(records: I, now: NaiveDateTime, fallback: NaiveDate) -> i64
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    let reference = last_publication(records).unwrap_or(fallback);
    whole_days_between(start_of_day(reference), now)
}
