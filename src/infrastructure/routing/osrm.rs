//! # OSRM Routing Provider
//!
//! [`RoutingProvider`] implementation backed by the OSRM Route service.
//!
//! One call issues exactly one request:
//!
//! ```text
//! GET {base_url}/route/v1/{profile}/{origin};{destination}?overview=false
//! ```
//!
//! `overview=false` asks OSRM for the summary only, without path geometry.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>
//!
//! # Examples
//!
//! ```no_run
//! use route_service::infrastructure::routing::{OsrmConfig, OsrmRoutingProvider};
//! use std::time::Duration;
//!
//! let config = OsrmConfig::new("http://localhost:5000")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(2));
//! let provider = OsrmRoutingProvider::new(config)?;
//! # Ok::<(), route_service::infrastructure::routing::ProviderError>(())
//! ```

use crate::domain::entities::Route;
use crate::domain::value_objects::Coordinate;
use crate::infrastructure::routing::error::{ProviderError, ProviderResult};
use crate::infrastructure::routing::http_client::HttpClient;
use crate::infrastructure::routing::traits::RoutingProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default OSRM endpoint.
pub const DEFAULT_BASE_URL: &str = "http://router.project-osrm.org";

/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "route-service/0.1";

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// OSRM status for a successful request.
const CODE_OK: &str = "Ok";

/// OSRM status for rejected input values.
const CODE_INVALID_VALUE: &str = "InvalidValue";

/// Configuration for [`OsrmRoutingProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmConfig {
    /// Base URL of the OSRM service.
    pub base_url: String,
    /// Routing profile, e.g. `"driving"`.
    pub profile: String,
    /// Per-call timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OsrmConfig {
    /// Creates a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// OSRM Route API response.
///
/// Only the fields the service consumes are decoded.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code, `"Ok"` on success.
    pub code: String,
    /// Error message when `code` is not `"Ok"`.
    #[serde(default)]
    pub message: Option<String>,
    /// Route candidates, best first.
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

/// One route candidate from OSRM.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteCandidate {
    /// Distance in meters.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// Routing provider calling an OSRM server over HTTP.
#[derive(Debug, Clone)]
pub struct OsrmRoutingProvider {
    client: HttpClient,
    config: OsrmConfig,
}

impl OsrmRoutingProvider {
    /// Creates a provider from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Transport` if the HTTP client cannot be built.
    pub fn new(config: OsrmConfig) -> ProviderResult<Self> {
        let timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX);
        let client = HttpClient::new(timeout_ms, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// Builds the Route API URL for one origin/destination pair.
    fn build_route_url(&self, origin: &Coordinate, destination: &Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{};{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin,
            destination
        )
    }

    /// Classifies an OSRM response by its status code.
    fn convert_response(
        &self,
        response: RouteResponse,
        destination: &Coordinate,
    ) -> ProviderResult<Route> {
        match response.code.as_str() {
            CODE_OK => {
                let candidate = response.routes.first().ok_or_else(|| {
                    ProviderError::missing_route("OSRM response has no route candidates")
                })?;
                Route::new(destination, candidate.distance, candidate.duration)
                    .map_err(|e| ProviderError::missing_route(e.to_string()))
            }
            CODE_INVALID_VALUE => Err(match response.message {
                Some(message) => ProviderError::invalid_input_with_detail(message),
                None => ProviderError::invalid_input(),
            }),
            _ => Err(ProviderError::service_failure(
                response.code,
                response.message.unwrap_or_default(),
            )),
        }
    }
}

#[async_trait]
impl RoutingProvider for OsrmRoutingProvider {
    fn name(&self) -> &str {
        "osrm"
    }

    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> ProviderResult<Route> {
        let url = self.build_route_url(&origin, &destination);
        debug!(%url, "requesting route from OSRM");

        let response: RouteResponse = self
            .client
            .get_with_params(&url, &[("overview", "false")])
            .await?;

        self.convert_response(response, &destination)
    }
}
