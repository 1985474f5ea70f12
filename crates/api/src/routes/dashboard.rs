//! Route definitions for the management dashboard.
//!
//! All endpoints require the GM or Manager role.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET  /metrics                      -> metrics
/// GET  /monthly-resolved             -> monthly_resolved
/// GET  /statistics?type=             -> statistics
/// GET  /departments                  -> departments
/// GET  /recent                       -> recent
/// GET  /export.xlsx                  -> export_tickets
/// GET  /charts/monthly.svg           -> monthly_chart
/// GET  /charts/statistics.svg        -> statistics_chart
/// GET  /charts/departments.svg       -> departments_chart
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(dashboard::metrics))
        .route("/monthly-resolved", get(dashboard::monthly_resolved))
        .route("/statistics", get(dashboard::statistics))
        .route("/departments", get(dashboard::departments))
        .route("/recent", get(dashboard::recent))
        .route("/export.xlsx", get(dashboard::export_tickets))
        .route("/charts/monthly.svg", get(dashboard::monthly_chart))
        .route("/charts/statistics.svg", get(dashboard::statistics_chart))
        .route("/charts/departments.svg", get(dashboard::departments_chart))
}
