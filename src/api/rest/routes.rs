//! Router construction.

use super::handlers::{AppState, get_routes};
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Builds the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/routes", get(get_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
