// crates/server/src/lib.rs
//! Outreach stats server library.
//!
//! Axum HTTP surface over the response-rate statistics: the `/api/stats/*`
//! endpoints, health, Prometheus metrics and the OpenAPI document.

pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::*;
pub use metrics::{init_metrics, record_request, render_metrics};
pub use routes::api_routes;
pub use state::AppState;

use axum::Router;
use outreach_stats_db::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (stats, health, metrics, openapi)
/// - CORS (allows any origin)
/// - Request tracing
pub fn create_app(db: Database) -> Router {
    let state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
