use super::domain::{compare_chronologically, AuditDetail, Chronology, Classified, EventCategory};
use crate::observatory::dataset::{AuditorRecord, RecordField};
use crate::observatory::dates::{parse_date, YearMonth};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Attrition,
    Inactivity,
    Total,
}

impl From<EventCategory> for SeriesKind {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Attrition => Self::Attrition,
            EventCategory::Inactivity => Self::Inactivity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub month: YearMonth,
    pub label: String,
    pub value: usize,
    pub kind: SeriesKind,
}

impl MonthlyPoint {
    pub fn new(month: YearMonth, value: usize, kind: SeriesKind) -> Self {
        Self {
            month,
            label: month.label(),
            value,
            kind,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySeries {
    pub points: Vec<MonthlyPoint>,
    pub details: BTreeMap<String, Vec<AuditDetail>>,
}

impl MonthlySeries {
    pub fn total(&self) -> usize {
        self.points.iter().map(|point| point.value).sum()
    }

    pub fn value_for(&self, label: &str) -> Option<usize> {
        self.points
            .iter()
            .find(|point| point.label == label)
            .map(|point| point.value)
    }
}

/// Counts records per calendar month of `field`.
///
/// Records whose `field` does not parse are left out of the series. Points
/// come back in year-month order; details under each label run oldest
/// first.
pub fn aggregate_monthly<'a, I>(records: I, field: RecordField, kind: SeriesKind) -> MonthlySeries
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    let mut months: BTreeMap<YearMonth, Vec<(NaiveDate, AuditDetail)>> = BTreeMap::new();

    for record in records {
        let Some(date) = parse_date(record.field(field)) else {
            continue;
        };
        let Some(detail) = AuditDetail::from_record(record) else {
            continue;
        };
        months.entry(YearMonth::of(date)).or_default().push((date, detail));
    }

    let mut points = Vec::with_capacity(months.len());
    let mut details = BTreeMap::new();
    for (month, mut entries) in months {
        entries.sort_by(|(left_date, left), (right_date, right)| {
            compare_chronologically(
                (Some(*left_date), left.name.as_str()),
                (Some(*right_date), right.name.as_str()),
                Chronology::OldestFirst,
            )
        });

        let point = MonthlyPoint::new(month, entries.len(), kind);
        details.insert(
            point.label.clone(),
            entries.into_iter().map(|(_, detail)| detail).collect(),
        );
        points.push(point);
    }

    MonthlySeries { points, details }
}

/// Monthly series for one category, keyed on that category's date column.
pub fn category_series<'a, I>(records: I, category: EventCategory) -> MonthlySeries
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    aggregate_monthly(
        records
            .into_iter()
            .filter(|record| record.category() == Some(category)),
        category.monthly_date_field(),
        category.into(),
    )
}
