//! Request handlers and wire types for the REST API.

use crate::application::error::ApplicationError;
use crate::application::services::RouteAggregationEngine;
use crate::domain::entities::{AggregationResult, Route};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Route aggregation engine.
    pub engine: Arc<RouteAggregationEngine>,
    /// Cancelled when the server shuts down.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new AppState.
    #[must_use]
    pub fn new(engine: Arc<RouteAggregationEngine>, shutdown: CancellationToken) -> Self {
        Self { engine, shutdown }
    }
}

/// Query parameters for `GET /routes`.
///
/// Both keys may repeat. Validation of counts and formats is left to the
/// engine so that every request path reports the same error codes.
#[derive(Debug, Default, Deserialize)]
pub struct RouteParams {
    /// Source coordinates as `lon,lat`.
    #[serde(default)]
    pub src: Vec<String>,
    /// Destination coordinates as `lon,lat`.
    #[serde(default)]
    pub dst: Vec<String>,
}

/// Successful response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Source as sent by the caller.
    pub source: String,
    /// Routes, fastest first.
    pub routes: Vec<Route>,
}

impl From<AggregationResult> for RouteResponse {
    fn from(result: AggregationResult) -> Self {
        Self {
            source: result.source,
            routes: result.routes,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = if self.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// `GET /routes`
///
/// # Errors
///
/// Returns 400 for invalid input and 500 for every other failure.
pub async fn get_routes(
    State(state): State<AppState>,
    Query(params): Query<RouteParams>,
) -> Result<Json<RouteResponse>, ApplicationError> {
    info!(
        sources = params.src.len(),
        destinations = params.dst.len(),
        "route request received"
    );

    // Dropped with the request future if the client goes away.
    let cancel = state.shutdown.child_token();
    let result = state
        .engine
        .resolve_routes(&params.src, &params.dst, &cancel)
        .await?;

    info!(routes = result.routes.len(), "route request finished");
    Ok(Json(RouteResponse::from(result)))
}
