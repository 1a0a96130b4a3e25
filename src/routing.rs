//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Redirect},
    routing::get,
};

use crate::{
    AppState, dashboard::get_dashboard_page, endpoints, logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .fallback(get_404_not_found)
        .layer(axum::middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> impl IntoResponse {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
