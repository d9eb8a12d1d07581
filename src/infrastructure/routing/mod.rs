//! # Routing Providers
//!
//! Port and adapters for external route computation.
//!
//! - [`RoutingProvider`]: the port the aggregation engine depends on
//! - [`OsrmRoutingProvider`]: OSRM Route service adapter
//! - [`ProviderError`]: classified per-call failures
//! - [`HttpClient`]: shared HTTP plumbing

pub mod error;
pub mod http_client;
pub mod osrm;
pub mod traits;

#[doc(hidden)]
pub mod test_support;

pub use error::{ErrorClass, ProviderError, ProviderResult};
pub use http_client::HttpClient;
pub use osrm::{OsrmConfig, OsrmRoutingProvider, RouteCandidate, RouteResponse};
pub use traits::RoutingProvider;
