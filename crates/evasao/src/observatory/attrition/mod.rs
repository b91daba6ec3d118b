pub mod destinations;
pub mod domain;
pub mod monthly;
pub mod report;
pub mod series;
pub mod streak;

pub use destinations::{
    aggregate_destinations, DestinationBreakdown, DestinationBucket, DestinationCount,
};
pub use domain::{AuditDetail, AuditorStatus, Classified, EventCategory};
pub use monthly::{aggregate_monthly, category_series, MonthlyPoint, MonthlySeries, SeriesKind};
pub use report::DashboardReport;
pub use series::unify_series;
pub use streak::longest_streak_days;
