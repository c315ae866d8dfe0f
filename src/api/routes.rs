//! API Routes
//!
//! Configures the Axum router with all launch service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, launches_handler, not_found_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /launches` - Filtered launch query, cached
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// Unknown paths get a JSON 404.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs every request and its latency
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/launches", get(launches_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
