use crate::infra::{
    deserialize_optional_date, evaluation_time, load_inline_or_candidates, AppState, DataSource,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use evasao::config::DataConfig;
use evasao::error::AppError;
use evasao::observatory::roster::{list_areas, roster, status_counts, RosterQuery, StatusCount};
use evasao::observatory::{AuditorRecord, DashboardReport, ReportOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardRequest {
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) area: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) data_source: DataSource,
    #[serde(flatten)]
    pub(crate) report: DashboardReport,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RosterRequest {
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) area: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) disability_only: bool,
    #[serde(default)]
    pub(crate) status: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterResponse {
    pub(crate) data_source: DataSource,
    pub(crate) area: String,
    pub(crate) areas: Vec<String>,
    pub(crate) total: usize,
    pub(crate) status_counts: Vec<StatusCount>,
    pub(crate) rows: Vec<AuditorRecord>,
}

pub(crate) fn with_observatory_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/dashboard",
            axum::routing::post(dashboard_endpoint),
        )
        .route("/api/v1/roster", axum::routing::post(roster_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_endpoint(
    Extension(data): Extension<Arc<DataConfig>>,
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let DashboardRequest { csv, area, today } = payload;

    let (records, data_source) = load_inline_or_candidates(csv.as_deref(), &data);
    let area = area.unwrap_or_else(|| data.default_area.clone());
    debug!(records = records.len(), %area, ?data_source, "building dashboard");

    let mut options = ReportOptions::new(evaluation_time(today)).with_area(area);
    options.observation_start = data.observation_start;
    let report = DashboardReport::build(&records, &options);

    Ok(Json(DashboardResponse {
        data_source,
        report,
    }))
}

pub(crate) async fn roster_endpoint(
    Extension(data): Extension<Arc<DataConfig>>,
    Json(payload): Json<RosterRequest>,
) -> Result<Json<RosterResponse>, AppError> {
    let RosterRequest {
        csv,
        area,
        name,
        disability_only,
        status,
    } = payload;

    let (records, data_source) = load_inline_or_candidates(csv.as_deref(), &data);
    let query = RosterQuery {
        area: area.unwrap_or_else(|| data.default_area.clone()),
        name_contains: name,
        disability_only,
        status,
    };

    let rows = roster(&records, &query);
    let status_counts = status_counts(rows.iter().copied());

    Ok(Json(RosterResponse {
        data_source,
        areas: list_areas(&records),
        total: rows.len(),
        status_counts,
        rows: rows.into_iter().cloned().collect(),
        area: query.area,
    }))
}
