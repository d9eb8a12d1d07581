//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! - `GET /routes?src={lon},{lat}&dst={lon},{lat}[&dst=...]` - Resolve and
//!   rank routes from one source to every destination
//!
//! Every other path answers 404.
//!
//! # Usage
//!
//! ```ignore
//! use route_service::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(engine), shutdown_token);
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ErrorResponse, RouteParams, RouteResponse, get_routes};
pub use routes::create_router;
