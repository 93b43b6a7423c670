//! API route handlers for the outreach stats server.

pub mod docs;
pub mod health;
pub mod metrics;
pub mod stats;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET /api/health - Health check
/// - GET /api/metrics - Prometheus metrics
/// - GET /api/openapi.json - OpenAPI document
/// - GET /api/stats/response-rates - Period statistics with optional comparison
/// - GET /api/stats/daily-stats - Per-day statistics
/// - GET /api/stats/projects - Projects derived from external thread ids
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", metrics::router())
        .nest("/api", docs::router())
        .nest("/api", stats::router())
        .with_state(state)
}
