//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, exists_handler, get_handler, health_handler, invalidate_handler, keys_handler,
    set_handler, stats_handler, sync_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: the dashboard runs in the browser on another origin
/// - Tracing: logs every request
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", get(keys_handler).delete(clear_handler))
        .route(
            "/cache/:key",
            put(set_handler)
                .get(get_handler)
                .patch(sync_handler)
                .delete(invalidate_handler),
        )
        .route("/cache/:key/exists", get(exists_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
