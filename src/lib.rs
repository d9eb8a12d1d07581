//! # Route Service
//!
//! Concurrent route aggregation over an external routing provider.
//!
//! Given one origin and any number of destinations, the service requests a
//! route for every origin/destination pair in parallel from an OSRM-compatible
//! provider, merges the answers and ranks them fastest-first.
//!
//! # Layers
//!
//! - [`domain`]: coordinates, routes and validation errors
//! - [`application`]: the aggregation engine, ranking strategies and
//!   classified application errors
//! - [`infrastructure`]: the routing provider port and its OSRM adapter
//! - [`api`]: the axum REST surface
//! - [`config`]: layered configuration loading
//!
//! # Examples
//!
//! ```ignore
//! use route_service::application::services::RouteAggregationEngine;
//! use route_service::infrastructure::routing::{OsrmConfig, OsrmRoutingProvider};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let provider = OsrmRoutingProvider::new(OsrmConfig::default())?;
//! let engine = RouteAggregationEngine::with_defaults(Arc::new(provider));
//!
//! let result = engine
//!     .resolve_routes(
//!         &["13.388860,52.517037".to_string()],
//!         &["13.397634,52.529407".to_string()],
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
