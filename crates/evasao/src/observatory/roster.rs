//! Tabular roster view: area catalogue, filters and row ordering.

use super::attrition::domain::{compare_chronologically, Chronology};
use super::dataset::AuditorRecord;
use super::dates::parse_date;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

pub const PRIMARY_AREA: &str = "FISCALIZAÇÃO";
pub const VETERAN_AREA: &str = "VETERANO";
pub const FALLBACK_AREA: &str = "Outros";
pub const UNKNOWN_STATUS: &str = "???";

pub fn area_of(record: &AuditorRecord) -> &str {
    record.area.as_deref().unwrap_or(FALLBACK_AREA)
}

/// Distinct areas, alphabetical, with the primary area moved to the front.
pub fn list_areas(records: &[AuditorRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec![PRIMARY_AREA.to_string()];
    }

    let unique: BTreeSet<&str> = records.iter().map(area_of).collect();
    let mut areas: Vec<String> = unique.into_iter().map(str::to_string).collect();
    if let Some(position) = areas.iter().position(|area| area == PRIMARY_AREA) {
        let primary = areas.remove(position);
        areas.insert(0, primary);
    }
    areas
}

pub fn filter_by_area<'a>(records: &'a [AuditorRecord], area: &str) -> Vec<&'a AuditorRecord> {
    records
        .iter()
        .filter(|record| area_of(record) == area)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RosterQuery {
    pub area: String,
    #[serde(default)]
    pub name_contains: Option<String>,
    #[serde(default)]
    pub disability_only: bool,
    #[serde(default)]
    pub status: Option<String>,
}

impl RosterQuery {
    pub fn for_area(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            ..Self::default()
        }
    }

    fn matches(&self, record: &AuditorRecord) -> bool {
        if area_of(record) != self.area {
            return false;
        }

        if let Some(needle) = self
            .name_contains
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
        {
            if !record.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if self.disability_only && !has_disability(record) {
            return false;
        }

        match self.status.as_deref().filter(|status| !status.is_empty()) {
            Some(wanted) => status_of(record).to_uppercase() == wanted.to_uppercase(),
            None => true,
        }
    }
}

pub fn has_disability(record: &AuditorRecord) -> bool {
    record
        .disability
        .as_deref()
        .is_some_and(|flag| flag.to_uppercase() == "SIM")
}

fn status_of(record: &AuditorRecord) -> &str {
    record.status.as_deref().unwrap_or(UNKNOWN_STATUS)
}

/// Rows of one area after applying the query's filters.
///
/// Veteran rows are ordered by their most recent publications; every other
/// area follows the contest ranking.
pub fn roster<'a>(records: &'a [AuditorRecord], query: &RosterQuery) -> Vec<&'a AuditorRecord> {
    let mut rows: Vec<&AuditorRecord> = records
        .iter()
        .filter(|record| query.matches(record))
        .collect();

    if query.area == VETERAN_AREA {
        rows.sort_by(|left, right| veteran_order(left, right));
    } else {
        rows.sort_by_key(|record| contest_rank(record));
    }
    rows
}

fn veteran_order(left: &AuditorRecord, right: &AuditorRecord) -> Ordering {
    newest_dated_first(
        parse_date(left.exoneration_published_on.as_deref()),
        parse_date(right.exoneration_published_on.as_deref()),
    )
    .then_with(|| {
        newest_dated_first(
            parse_date(left.inactivity_published_on.as_deref()),
            parse_date(right.inactivity_published_on.as_deref()),
        )
    })
    .then_with(|| left.name.cmp(&right.name))
}

fn newest_dated_first(
    left: Option<chrono::NaiveDate>,
    right: Option<chrono::NaiveDate>,
) -> Ordering {
    match (left, right) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => compare_chronologically((left, ""), (right, ""), Chronology::NewestFirst),
    }
}

/// Leading digits of the contest position; anything else ranks as zero.
pub fn contest_rank(record: &AuditorRecord) -> i64 {
    let raw = record.contest_rank.as_deref().unwrap_or("").trim();
    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Rows per status, exactly as exported, in the order statuses first
/// appear. Spellings that differ only in case are counted apart.
pub fn status_counts<'a, I>(records: I) -> Vec<StatusCount>
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    let mut counts: Vec<StatusCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in records {
        let status = status_of(record).to_string();
        match positions.get(&status) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(status.clone(), counts.len());
                counts.push(StatusCount { status, count: 1 });
            }
        }
    }
    counts
}
