mod summary;
pub mod views;

pub use summary::ReportOptions;
pub use views::{AreaCount, AreaDashboard, DashboardReport, DashboardView};
