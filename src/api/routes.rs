//! API Routes
//!
//! Configures the Axum router with the proxy and cache admin endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_key_handler, force_refresh_handler, health_handler,
    loan_window_handler, match_status_handler, policy_handler, proxy_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, the dashboard is served from elsewhere
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/*path", get(proxy_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/policy", get(policy_handler))
        .route("/cache/policy/loan-window", post(loan_window_handler))
        .route("/cache/policy/match-status", post(match_status_handler))
        .route("/cache/categories/:category", delete(force_refresh_handler))
        .route(
            "/cache/keys/:category/*discriminator",
            delete(delete_key_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
