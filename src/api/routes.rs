//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    analyze_handler, flight_detail_handler, flights_handler, health_handler, insight_handler,
    latest_flights_handler, recommendations_handler, search_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin; the map front-end is served separately
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/countries/:name/insight", get(insight_handler))
        .route("/countries/:name/recommendations", get(recommendations_handler))
        .route("/search", post(search_handler))
        .route("/interactions/analyze", post(analyze_handler))
        .route("/flights", get(flights_handler))
        .route("/flights/latest", get(latest_flights_handler))
        .route("/flights/:id", get(flight_detail_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
