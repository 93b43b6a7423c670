// crates/server/src/routes/stats.rs
//! Response-rate statistics endpoints.
//!
//! - GET /api/stats/response-rates
//! - GET /api/stats/daily-stats
//! - GET /api/stats/projects

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use outreach_stats_core::{
    parse_date, DailyStats, PeriodQuery, Project, StatsFilters, StatsResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::metrics::record_request;
use crate::state::AppState;

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Query parameters of the period and daily endpoints.
///
/// Everything arrives as an optional string so missing or malformed values
/// are reported through the JSON error envelope rather than axum's plain-text
/// rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsParams {
    /// Owner of the history entries (required).
    pub user_id: Option<String>,
    /// First day of the period, `YYYY-MM-DD` (required).
    pub start_date: Option<String>,
    /// Last day of the period, inclusive, `YYYY-MM-DD` (required).
    pub end_date: Option<String>,
    /// Restrict to one external thread. Empty means all.
    pub project_id: Option<String>,
    /// `true` to compare against the preceding period of equal length.
    pub include_comparison: Option<String>,
}

/// Query parameters of the projects endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectsParams {
    /// Owner of the history entries (required).
    pub user_id: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> ApiResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingParam(name))
}

impl StatsParams {
    pub fn filters(&self) -> ApiResult<StatsFilters> {
        let user_id = required(&self.user_id, "user_id")?;
        let start_date = parse_date(required(&self.start_date, "start_date")?)?;
        let end_date = parse_date(required(&self.end_date, "end_date")?)?;
        let project_id = self
            .project_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(StatsFilters {
            user_id: user_id.to_string(),
            start_date,
            end_date,
            project_id,
        })
    }

    /// Only the literal `true` enables the comparison.
    pub fn include_comparison(&self) -> bool {
        self.include_comparison.as_deref() == Some("true")
    }
}

/// Record the request metric and wrap the payload in the success envelope.
fn respond<T>(
    endpoint: &str,
    start: Instant,
    result: ApiResult<T>,
) -> ApiResult<Json<ApiResponse<T>>> {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };
    record_request(endpoint, status.as_str(), start.elapsed());
    result.map(|data| Json(ApiResponse::ok(data)))
}

async fn fetch_response_rates(state: &AppState, params: &StatsParams) -> ApiResult<StatsResponse> {
    let filters = params.filters()?;
    let include_comparison = params.include_comparison();
    tracing::debug!(
        user_id = %filters.user_id,
        start_date = %filters.start_date,
        end_date = %filters.end_date,
        project_id = ?filters.project_id,
        include_comparison,
        "Fetching response rates"
    );
    Ok(state
        .stats
        .complete_stats(&filters, include_comparison)
        .await?)
}

async fn fetch_daily_stats(state: &AppState, params: &StatsParams) -> ApiResult<Vec<DailyStats>> {
    let query = PeriodQuery::from_filters(&params.filters()?)?;
    Ok(state.stats.daily_stats(&query).await?)
}

/// GET /api/stats/response-rates - Per-type and overall response rates.
#[utoipa::path(
    get,
    path = "/api/stats/response-rates",
    tag = "stats",
    params(StatsParams),
    responses(
        (status = 200, description = "Statistics for the period", body = ApiResponse<StatsResponse>),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 500, description = "Data access failure", body = ErrorResponse)
    )
)]
pub async fn response_rates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> ApiResult<Json<ApiResponse<StatsResponse>>> {
    let start = Instant::now();
    let result = fetch_response_rates(&state, &params).await;
    respond("response_rates", start, result)
}

/// GET /api/stats/daily-stats - Per-day, per-type statistics for days with activity.
#[utoipa::path(
    get,
    path = "/api/stats/daily-stats",
    tag = "stats",
    params(StatsParams),
    responses(
        (status = 200, description = "Daily statistics, ascending by date", body = ApiResponse<Vec<DailyStats>>),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 500, description = "Data access failure", body = ErrorResponse)
    )
)]
pub async fn daily_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> ApiResult<Json<ApiResponse<Vec<DailyStats>>>> {
    let start = Instant::now();
    let result = fetch_daily_stats(&state, &params).await;
    respond("daily_stats", start, result)
}

/// GET /api/stats/projects - Up to 50 projects, most active first.
#[utoipa::path(
    get,
    path = "/api/stats/projects",
    tag = "stats",
    params(ProjectsParams),
    responses(
        (status = 200, description = "Projects for the user", body = ApiResponse<Vec<Project>>),
        (status = 400, description = "Missing user_id", body = ErrorResponse),
        (status = 500, description = "Data access failure", body = ErrorResponse)
    )
)]
pub async fn projects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProjectsParams>,
) -> ApiResult<Json<ApiResponse<Vec<Project>>>> {
    let start = Instant::now();
    let result = match required(&params.user_id, "user_id") {
        Ok(user_id) => state
            .stats
            .available_projects(user_id)
            .await
            .map_err(ApiError::from),
        Err(e) => Err(e),
    };
    respond("projects", start, result)
}

/// Create the stats routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats/response-rates", get(response_rates))
        .route("/stats/daily-stats", get(daily_stats))
        .route("/stats/projects", get(projects))
}
