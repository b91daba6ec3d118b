//! Evasion observatory: decoding of the roster export and the pure
//! aggregations the dashboard is rendered from.

pub mod attrition;
pub mod dataset;
pub mod dates;
pub mod roster;

pub use attrition::report::{DashboardReport, ReportOptions};
pub use dataset::{AuditorRecord, Dataset, DatasetError, RawRow};
