//! Handlers for the management dashboard.
//!
//! Provides the metric endpoints, the XLSX export and the chart images.
//! All endpoints require the GM or Manager role via [`RequireManagement`].

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use helpdesk_core::chart::svg::{render_area_chart, render_department_bars, render_monthly_bars};
use helpdesk_core::chart::{AreaChart, DepartmentBars, MonthlyBars, AREA_CHART_DEFAULT_WIDTH};
use helpdesk_core::error::CoreError;
use helpdesk_core::export::{tickets_to_xlsx, EXPORT_FILE_NAME};
use helpdesk_core::metrics::{
    fill_monthly_resolved, merge_time_distribution, ChartType, DepartmentCount, MonthPoint,
    StatisticsPoint, TicketCounts,
};
use helpdesk_core::ticket::{map_backend_tickets, Ticket};
use helpdesk_core::user::name_index;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireManagement;
use crate::response::DataResponse;
use crate::state::AppState;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Status value the backend uses to select the resolved series.
const RESOLVED_SERIES_STATUS: &str = "resolved";

// ---------------------------------------------------------------------------
// Response and query types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    #[serde(flatten)]
    pub counts: TicketCounts,
    pub open_tickets: i64,
}

/// Query params for the statistics endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    /// `monthly` (default), `quarterly` or `yearly`.
    #[serde(rename = "type")]
    pub chart_type: Option<String>,
    /// Chart width in pixels. Only used by the SVG endpoint.
    pub width: Option<f64>,
}

impl StatisticsQuery {
    /// Requested chart width; `NaN` and infinities are rejected.
    fn width(&self) -> AppResult<f64> {
        match self.width {
            None => Ok(AREA_CHART_DEFAULT_WIDTH),
            Some(width) if width.is_finite() => Ok(width),
            Some(_) => Err(CoreError::Validation("width must be a finite number".into()).into()),
        }
    }

    fn chart_type(&self) -> AppResult<ChartType> {
        match self.chart_type.as_deref().map(str::trim) {
            None | Some("") => Ok(ChartType::default()),
            Some(value) => Ok(ChartType::parse(value)?),
        }
    }
}

async fn statistics_points(state: &AppState, chart_type: ChartType) -> AppResult<Vec<StatisticsPoint>> {
    let (opened, resolved) = futures::try_join!(
        state.backend.time_distribution(chart_type, None),
        state
            .backend
            .time_distribution(chart_type, Some(RESOLVED_SERIES_STATUS))
    )?;
    Ok(merge_time_distribution(chart_type, &opened, &resolved))
}

fn svg(document: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], document)
}

// ---------------------------------------------------------------------------
// Metric endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/metrics
pub async fn metrics(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MetricsSummary>>> {
    let counts = state.backend.ticket_counts().await?;
    Ok(Json(DataResponse {
        data: MetricsSummary {
            open_tickets: counts.open_tickets(),
            counts,
        },
    }))
}

/// GET /api/v1/dashboard/monthly-resolved
///
/// Always twelve points, `Jan` to `Dec`.
pub async fn monthly_resolved(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MonthPoint>>>> {
    let rows = state.backend.monthly_resolved().await?;
    Ok(Json(DataResponse {
        data: fill_monthly_resolved(&rows),
    }))
}

/// GET /api/v1/dashboard/statistics?type=
///
/// Opened vs resolved per period.
pub async fn statistics(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<Json<DataResponse<Vec<StatisticsPoint>>>> {
    let points = statistics_points(&state, query.chart_type()?).await?;
    Ok(Json(DataResponse { data: points }))
}

/// GET /api/v1/dashboard/departments
pub async fn departments(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DepartmentCount>>>> {
    let rows = state.backend.department_breakdown().await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/dashboard/recent
pub async fn recent(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Ticket>>>> {
    let (users, raw) =
        futures::try_join!(state.backend.list_users(), state.backend.recent_tickets())?;
    Ok(Json(DataResponse {
        data: map_backend_tickets(&raw, &name_index(&users), chrono::Utc::now()),
    }))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/export.xlsx
///
/// Every ticket as a spreadsheet download.
pub async fn export_tickets(
    RequireManagement(user): RequireManagement,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (users, tickets) =
        futures::try_join!(state.backend.list_users(), state.backend.list_tickets())?;
    let bytes = tickets_to_xlsx(&tickets, &name_index(&users))?;
    tracing::info!(user_id = user.user_id, rows = tickets.len(), "Tickets exported");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    ))
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/charts/monthly.svg
pub async fn monthly_chart(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = state.backend.monthly_resolved().await?;
    let chart = MonthlyBars::new(&fill_monthly_resolved(&rows));
    Ok(svg(render_monthly_bars(&chart)))
}

/// GET /api/v1/dashboard/charts/statistics.svg?type=&width=
pub async fn statistics_chart(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<impl IntoResponse> {
    let width = query.width()?;
    let points = statistics_points(&state, query.chart_type()?).await?;
    Ok(svg(render_area_chart(&AreaChart::new(points, width))))
}

/// GET /api/v1/dashboard/charts/departments.svg
pub async fn departments_chart(
    RequireManagement(_user): RequireManagement,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = state.backend.department_breakdown().await?;
    Ok(svg(render_department_bars(&DepartmentBars::new(&rows))))
}
