use super::super::destinations::aggregate_destinations;
use super::super::domain::{Classified, EventCategory};
use super::super::monthly::category_series;
use super::super::series::unify_series;
use super::super::streak::{days_since_last_event, last_publication, longest_streak_days};
use super::views::{AreaCount, AreaDashboard, DashboardReport, DashboardView};
use crate::config::DataConfig;
use crate::observatory::dataset::AuditorRecord;
use crate::observatory::roster::{area_of, filter_by_area, list_areas};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use tracing::debug;

/// Inputs that are not part of the record set itself.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub area: Option<String>,
    pub now: NaiveDateTime,
    pub observation_start: NaiveDate,
}

impl ReportOptions {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            area: None,
            now,
            observation_start: DataConfig::default_observation_start(),
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

impl DashboardView {
    /// Runs every aggregation over exactly `records`; nothing outside the
    /// slice is consulted.
    pub fn from_records(records: &[&AuditorRecord]) -> Self {
        let destinations = aggregate_destinations(records.iter().copied());
        let attrition = category_series(records.iter().copied(), EventCategory::Attrition);
        let inactivity = category_series(records.iter().copied(), EventCategory::Inactivity);
        let combined = unify_series(&attrition.points, &inactivity.points);

        let attrition_count = count_category(records, EventCategory::Attrition);
        let inactivity_count = count_category(records, EventCategory::Inactivity);

        Self {
            record_count: records.len(),
            relevant_count: attrition_count + inactivity_count,
            attrition_count,
            inactivity_count,
            destinations: destinations.counts,
            destination_details: destinations.details,
            attrition,
            inactivity,
            combined,
            attrition_by_area: attrition_by_area(records),
        }
    }

    pub fn destinations_total(&self) -> usize {
        self.destinations.iter().map(|entry| entry.count).sum()
    }
}

fn count_category(records: &[&AuditorRecord], category: EventCategory) -> usize {
    records
        .iter()
        .filter(|record| record.category() == Some(category))
        .count()
}

fn attrition_by_area(records: &[&AuditorRecord]) -> Vec<AreaCount> {
    let mut counts: Vec<AreaCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for record in records
        .iter()
        .filter(|record| record.category() == Some(EventCategory::Attrition))
    {
        let area = area_of(record);
        match positions.get(area) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(area, counts.len());
                counts.push(AreaCount {
                    area: area.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
}

impl DashboardReport {
    /// Builds the full view and, when an area is requested, the same view
    /// over that area's records. The streak and last-event figures always
    /// cover the whole record set.
    pub fn build(records: &[AuditorRecord], options: &ReportOptions) -> Self {
        let everyone: Vec<&AuditorRecord> = records.iter().collect();
        let overall = DashboardView::from_records(&everyone);

        let area = options.area.as_deref().map(|area| {
            let subset = filter_by_area(records, area);
            debug!(area, records = subset.len(), "building area view");
            AreaDashboard {
                area: area.to_string(),
                view: DashboardView::from_records(&subset),
            }
        });

        Self {
            generated_at: options.now,
            longest_streak_days: longest_streak_days(records, options.now),
            last_event_on: last_publication(records),
            days_since_last_event: days_since_last_event(
                records,
                options.now,
                options.observation_start,
            ),
            areas: list_areas(records),
            overall,
            area,
        }
    }
}
