//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page showing the aggregated record tables.
pub const DASHBOARD_VIEW: &str = "/dashboard";
