// crates/server/src/routes/docs.rs
//! OpenAPI document for the stats API.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use outreach_stats_core::{
    DailyStats, MessageType, MessageTypeStats, Period, PeriodComparison, Project, StatsResponse,
    TypeComparison,
};
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::routes::{health, stats};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Outreach Stats API",
        description = "Response-rate statistics over outbound email and LinkedIn outreach.",
        license(name = "MIT")
    ),
    tags(
        (name = "stats", description = "Response-rate statistics"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        health::health_check,
        stats::response_rates,
        stats::daily_stats,
        stats::projects,
    ),
    components(schemas(
        MessageType,
        MessageTypeStats,
        TypeComparison,
        PeriodComparison,
        Period,
        StatsResponse,
        DailyStats,
        Project,
        ErrorResponse,
        health::HealthResponse,
    ))
)]
pub struct ApiDoc;

/// GET /api/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/openapi.json", get(openapi_json))
}
