//! # Routing Provider Trait
//!
//! Port definition for route computation backends.
//!
//! The aggregation engine only talks to routing backends through
//! [`RoutingProvider`], so the OSRM adapter can be swapped for a stub in
//! tests or for another backend entirely.
//!
//! # Examples
//!
//! ```ignore
//! use route_service::infrastructure::routing::traits::RoutingProvider;
//! use route_service::infrastructure::routing::error::ProviderResult;
//!
//! struct MyProvider { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl RoutingProvider for MyProvider {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::Route;
use crate::domain::value_objects::Coordinate;
use crate::infrastructure::routing::error::ProviderResult;
use async_trait::async_trait;
use std::fmt;

/// A backend able to compute a single route summary.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait RoutingProvider: Send + Sync + fmt::Debug {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Fetches the route from `origin` to `destination`.
    ///
    /// Both coordinates are already range-checked. The returned route's
    /// destination is stamped with `destination`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`](crate::infrastructure::routing::error::ProviderError)
    /// classified as invalid input, provider failure or internal failure.
    async fn fetch_route(&self, origin: Coordinate, destination: Coordinate)
    -> ProviderResult<Route>;
}
