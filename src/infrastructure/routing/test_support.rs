//! Test utilities for routing providers.
//!
//! This module provides [`StubRoutingProvider`], a deterministic test double
//! for [`RoutingProvider`] that answers from pre-configured per-destination
//! responses without making HTTP requests.

use crate::domain::entities::Route;
use crate::domain::value_objects::Coordinate;
use crate::infrastructure::routing::error::{ProviderError, ProviderResult};
use crate::infrastructure::routing::traits::RoutingProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Stub `RoutingProvider` for testing.
///
/// Responses are keyed by the destination's display form
/// (`"13.397634,52.529407"`). Unknown destinations fail with
/// `ProviderError::MissingRoute`.
///
/// # Example
///
/// ```
/// use route_service::infrastructure::routing::test_support::StubRoutingProvider;
/// use route_service::infrastructure::routing::RoutingProvider;
/// use route_service::domain::value_objects::Coordinate;
///
/// let provider = StubRoutingProvider::new().with_route("13.397634,52.529407", 10.0, 15.0);
/// let origin: Coordinate = "13.388860,52.517037".parse().unwrap();
/// let destination: Coordinate = "13.397634,52.529407".parse().unwrap();
///
/// let route = tokio_test::block_on(provider.fetch_route(origin, destination)).unwrap();
/// assert_eq!(route.duration(), 15.0);
/// assert_eq!(provider.calls(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StubRoutingProvider {
    responses: HashMap<String, StubResponse>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

#[derive(Debug, Clone)]
struct StubResponse {
    outcome: Result<(f64, f64), ProviderError>,
    latency: Duration,
}

impl StubRoutingProvider {
    /// Creates a provider with no configured destinations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `destination` with the given distance and duration.
    #[must_use]
    pub fn with_route(self, destination: &str, distance: f64, duration: f64) -> Self {
        self.with_response(destination, Ok((distance, duration)), Duration::ZERO)
    }

    /// Answers `destination` with a route after `latency`.
    #[must_use]
    pub fn with_delayed_route(
        self,
        destination: &str,
        distance: f64,
        duration: f64,
        latency: Duration,
    ) -> Self {
        self.with_response(destination, Ok((distance, duration)), latency)
    }

    /// Fails `destination` with `error`.
    #[must_use]
    pub fn with_error(self, destination: &str, error: ProviderError) -> Self {
        self.with_response(destination, Err(error), Duration::ZERO)
    }

    /// Fails `destination` with `error` after `latency`.
    #[must_use]
    pub fn with_delayed_error(
        self,
        destination: &str,
        error: ProviderError,
        latency: Duration,
    ) -> Self {
        self.with_response(destination, Err(error), latency)
    }

    fn with_response(
        mut self,
        destination: &str,
        outcome: Result<(f64, f64), ProviderError>,
        latency: Duration,
    ) -> Self {
        self.responses
            .insert(destination.to_string(), StubResponse { outcome, latency });
        self
    }

    /// Number of calls started.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls that ran to completion without being dropped.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingProvider for StubRoutingProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_route(
        &self,
        _origin: Coordinate,
        destination: Coordinate,
    ) -> ProviderResult<Route> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = destination.to_string();

        let Some(response) = self.responses.get(&key).cloned() else {
            return Err(ProviderError::missing_route(format!(
                "no stub response for {key}"
            )));
        };

        if !response.latency.is_zero() {
            tokio::time::sleep(response.latency).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        let (distance, duration) = response.outcome?;
        Route::new(&destination, distance, duration)
            .map_err(|e| ProviderError::missing_route(e.to_string()))
    }
}
