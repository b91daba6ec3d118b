use chrono::{Local, NaiveDate, NaiveDateTime};
use evasao::config::DataConfig;
use evasao::error::AppError;
use evasao::observatory::dates::start_of_day;
use evasao::observatory::{AuditorRecord, Dataset};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Where the records behind a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DataSource {
    Inline,
    File,
    Candidates,
    Empty,
}

/// Records submitted with a request win; otherwise the configured candidate
/// exports are tried in order and an empty set is used when none loads.
pub(crate) fn load_inline_or_candidates(
    csv: Option<&str>,
    data: &DataConfig,
) -> (Vec<AuditorRecord>, DataSource) {
    match csv {
        Some(text) => (Dataset::from_text(text).into_records(), DataSource::Inline),
        None => load_candidates(data),
    }
}

/// An explicit path must load; only the configured fallbacks may be missing.
pub(crate) fn load_path_or_candidates(
    path: Option<&Path>,
    data: &DataConfig,
) -> Result<(Vec<AuditorRecord>, DataSource), AppError> {
    match path {
        Some(path) => {
            let dataset = Dataset::from_path(path)?;
            Ok((dataset.into_records(), DataSource::File))
        }
        None => Ok(load_candidates(data)),
    }
}

fn load_candidates(data: &DataConfig) -> (Vec<AuditorRecord>, DataSource) {
    match Dataset::from_candidates(data.candidate_paths.as_slice()) {
        Ok(dataset) => (dataset.into_records(), DataSource::Candidates),
        Err(err) => {
            warn!(error = %err, "falling back to an empty roster");
            (Vec::new(), DataSource::Empty)
        }
    }
}

pub(crate) fn evaluation_time(today: Option<NaiveDate>) -> NaiveDateTime {
    today
        .map(start_of_day)
        .unwrap_or_else(|| Local::now().naive_local())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
