//! Dashboard module
//!
//! Provides the single page showing the record list aggregated by month and
//! by year, alongside the records themselves sorted newest first.

mod aggregation;
mod handlers;
mod record;
mod tables;

pub use handlers::{DashboardState, get_dashboard_page};
pub use record::{DatedAmount, MonthSummary, YearSummary};
pub(crate) use record::count_invalid_dates;
