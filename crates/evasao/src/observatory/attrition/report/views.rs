use super::super::destinations::DestinationCount;
use super::super::domain::AuditDetail;
use super::super::monthly::{MonthlyPoint, MonthlySeries};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCount {
    pub area: String,
    pub count: usize,
}

/// Every aggregate the dashboard renders for one record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub record_count: usize,
    pub relevant_count: usize,
    pub attrition_count: usize,
    pub inactivity_count: usize,
    pub destinations: Vec<DestinationCount>,
    pub destination_details: BTreeMap<String, Vec<AuditDetail>>,
    pub attrition: MonthlySeries,
    pub inactivity: MonthlySeries,
    pub combined: Vec<MonthlyPoint>,
    pub attrition_by_area: Vec<AreaCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaDashboard {
    pub area: String,
    #[serde(flatten)]
    pub view: DashboardView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub generated_at: NaiveDateTime,
    pub longest_streak_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_on: Option<NaiveDate>,
    pub days_since_last_event: i64,
    pub areas: Vec<String>,
    pub overall: DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaDashboard>,
}
