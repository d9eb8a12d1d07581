//! # Route Aggregation Engine
//!
//! Resolves routes from one origin to many destinations.
//!
//! This module provides the [`RouteAggregationEngine`], which validates the
//! caller's coordinates, requests every destination from the routing
//! provider concurrently and ranks the results.
//!
//! # Failure policy
//!
//! A request either resolves every destination or fails as a whole. The
//! first provider call to fail cancels its siblings through a shared
//! [`CancellationToken`], and only that failure is reported. When several
//! destinations fail at nearly the same time, which one is reported depends
//! on scheduling.

use crate::application::error::{
    ApplicationError, ApplicationResult, GENERIC_FAILURE_MESSAGE, InputErrorCode,
};
use crate::application::services::ranking_strategy::{FastestRouteStrategy, RankingStrategy};
use crate::domain::entities::{AggregationResult, Route};
use crate::domain::value_objects::Coordinate;
use crate::infrastructure::routing::error::{ProviderError, ProviderResult};
use crate::infrastructure::routing::traits::RoutingProvider;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Configuration for route aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Overall deadline for resolving all destinations, in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10000,
        }
    }
}

impl AggregationConfig {
    /// Creates a configuration with the given overall deadline.
    #[must_use]
    pub fn with_timeout(request_timeout_ms: u64) -> Self {
        Self { request_timeout_ms }
    }
}

/// Holds the first error reported by any worker.
///
/// Later errors are dropped.
#[derive(Debug, Default)]
struct FirstError(OnceLock<ProviderError>);

impl FirstError {
    /// Records `error` if no error is held yet. Returns true if it was kept.
    fn record(&self, error: ProviderError) -> bool {
        self.0.set(error).is_ok()
    }

    fn get(&self) -> Option<&ProviderError> {
        self.0.get()
    }
}

/// Engine resolving and ranking routes through a routing provider.
#[derive(Debug)]
pub struct RouteAggregationEngine {
    provider: Arc<dyn RoutingProvider>,
    ranking_strategy: Arc<dyn RankingStrategy>,
    config: AggregationConfig,
}

impl RouteAggregationEngine {
    /// Creates a new RouteAggregationEngine.
    #[must_use]
    pub fn new(
        provider: Arc<dyn RoutingProvider>,
        ranking_strategy: Arc<dyn RankingStrategy>,
        config: AggregationConfig,
    ) -> Self {
        Self {
            provider,
            ranking_strategy,
            config,
        }
    }

    /// Creates a new engine ranking fastest-first with default configuration.
    #[must_use]
    pub fn with_defaults(provider: Arc<dyn RoutingProvider>) -> Self {
        Self::new(
            provider,
            Arc::new(FastestRouteStrategy::new()),
            AggregationConfig::default(),
        )
    }

    /// Validates the request, resolves every destination and ranks the routes.
    ///
    /// # Arguments
    ///
    /// * `sources` - Source parameters; exactly one is required
    /// * `destinations` - Destination parameters; at least one is required
    /// * `cancel` - Token tied to the caller's lifetime; cancelling it aborts
    ///   all outstanding provider calls
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidInput` if a parameter is missing or
    /// malformed (before any provider call) or if the provider rejects a
    /// coordinate. Every other failure is returned as
    /// `ApplicationError::InternalFailure` with a generic message; the
    /// provider detail is logged only.
    pub async fn resolve_routes(
        &self,
        sources: &[String],
        destinations: &[String],
        cancel: &CancellationToken,
    ) -> ApplicationResult<AggregationResult> {
        let (source, origin) = parse_source(sources)?;
        let targets = parse_destinations(destinations)?;

        info!(
            source,
            destinations = targets.len(),
            provider = self.provider.name(),
            "resolving routes"
        );

        let deadline = Duration::from_millis(self.config.request_timeout_ms);
        let routes = match timeout(deadline, self.collect_routes(origin, &targets, cancel)).await {
            Ok(Ok(routes)) => routes,
            Ok(Err(err)) => return Err(classify_provider_error(err)),
            Err(_) => {
                error!(
                    timeout_ms = self.config.request_timeout_ms,
                    "route aggregation timed out"
                );
                return Err(ApplicationError::internal(GENERIC_FAILURE_MESSAGE));
            }
        };

        let ranked = self.ranking_strategy.rank(routes);
        debug!(
            strategy = self.ranking_strategy.name(),
            routes = ranked.len(),
            "routes ranked"
        );

        Ok(AggregationResult::new(source, ranked))
    }

    /// Requests all destinations concurrently.
    ///
    /// Returns one route per destination in input order, regardless of the
    /// order in which calls complete.
    ///
    /// # Errors
    ///
    /// Returns the first provider error observed, or
    /// `ProviderError::Cancelled` if `cancel` fired before all calls finished.
    pub async fn collect_routes(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<Route>> {
        let token = cancel.child_token();
        // Cancels stragglers on every exit path, including drop.
        let _guard = token.clone().drop_guard();
        let first_error = Arc::new(FirstError::default());
        let mut join_set = JoinSet::new();

        for (index, destination) in destinations.iter().copied().enumerate() {
            let provider = Arc::clone(&self.provider);
            let token = token.clone();
            let first_error = Arc::clone(&first_error);

            join_set.spawn(async move {
                let outcome = tokio::select! {
                    biased;
                    () = token.cancelled() => return None,
                    outcome = provider.fetch_route(origin, destination) => outcome,
                };

                match outcome {
                    Ok(route) => {
                        debug!(index, destination = %destination, "route resolved");
                        Some((index, route))
                    }
                    Err(err) => {
                        debug!(
                            index,
                            destination = %destination,
                            error = %err,
                            "route request failed"
                        );
                        first_error.record(err);
                        token.cancel();
                        None
                    }
                }
            });
        }

        let mut slots: Vec<Option<Route>> = vec![None; destinations.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Some((index, route))) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(route);
                    }
                }
                Ok(None) => {}
                Err(join_error) => {
                    first_error.record(ProviderError::transport(format!(
                        "route task failed: {join_error}"
                    )));
                    token.cancel();
                }
            }
        }

        if let Some(err) = first_error.get() {
            return Err(err.clone());
        }

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(ProviderError::Cancelled)
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranking_strategy.name()
    }
}

/// Maps a provider error to what the caller is allowed to see.
fn classify_provider_error(err: ProviderError) -> ApplicationError {
    if matches!(err, ProviderError::Cancelled) {
        info!("route request cancelled by caller");
        return ApplicationError::internal("request cancelled");
    }

    match ApplicationError::from(err) {
        invalid @ ApplicationError::InvalidInput { .. } => {
            warn!(error = %invalid, "routing provider rejected coordinates");
            invalid
        }
        other => {
            error!(error = %other, "route aggregation failed");
            ApplicationError::internal(GENERIC_FAILURE_MESSAGE)
        }
    }
}

fn parse_source(sources: &[String]) -> ApplicationResult<(&str, Coordinate)> {
    let [source] = sources else {
        return Err(ApplicationError::invalid_input(
            InputErrorCode::MissingSourceParameter,
            "one src parameter must be specified",
        ));
    };

    let origin = source.parse::<Coordinate>().map_err(|e| {
        ApplicationError::invalid_input(
            InputErrorCode::InvalidSourceParameter,
            format!("invalid src parameter: {source:?} - {e}"),
        )
    })?;

    Ok((source.as_str(), origin))
}

fn parse_destinations(destinations: &[String]) -> ApplicationResult<Vec<Coordinate>> {
    if destinations.is_empty() {
        return Err(ApplicationError::invalid_input(
            InputErrorCode::MissingDestinationParameter,
            "at least one dst parameter must be specified",
        ));
    }

    destinations
        .iter()
        .map(|destination| {
            destination.parse::<Coordinate>().map_err(|e| {
                ApplicationError::invalid_input(
                    InputErrorCode::InvalidDestinationParameter,
                    format!("invalid dst parameter: {destination:?} - {e}"),
                )
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::infrastructure::routing::error::ErrorClass;
    use crate::infrastructure::routing::test_support::StubRoutingProvider;
    use std::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    const SOURCE: &str = "13.388860,52.517037";
    const DST_A: &str = "13.397634,52.529407";
    const DST_B: &str = "13.428555,52.523219";
    const DST_C: &str = "13.400000,52.500000";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn coordinates(values: &[&str]) -> Vec<Coordinate> {
        values.iter().map(|v| v.parse().unwrap()).collect()
    }

    fn engine(provider: &Arc<StubRoutingProvider>) -> RouteAggregationEngine {
        RouteAggregationEngine::with_defaults(Arc::clone(provider) as Arc<dyn RoutingProvider>)
    }

    #[tokio::test]
    async fn resolve_routes_ranks_results() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_route(DST_A, 25.0, 30.0)
                .with_route(DST_B, 10.0, 15.0),
        );

        let result = engine(&provider)
            .resolve_routes(
                &strings(&[SOURCE]),
                &strings(&[DST_A, DST_B]),
                &CancellationToken::new(),
            )
            .await;
        let result = assert_ok!(result);

        assert_eq!(result.source, SOURCE);
        assert_eq!(result.routes.len(), 2);
        assert_eq!(result.routes[0].destination(), DST_B);
        assert_eq!(result.routes[0].duration(), 15.0);
        assert_eq!(result.routes[1].destination(), DST_A);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn source_keeps_caller_text() {
        let provider = Arc::new(StubRoutingProvider::new().with_route(DST_A, 1.0, 1.0));

        let result = engine(&provider)
            .resolve_routes(
                &strings(&["13.38886,52.517037"]),
                &strings(&[DST_A]),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.source, "13.38886,52.517037");
    }

    #[tokio::test]
    async fn missing_source_is_invalid_input() {
        let provider = Arc::new(StubRoutingProvider::new());

        let err = engine(&provider)
            .resolve_routes(&[], &strings(&[DST_A]), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "MissingSourceParameter");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn multiple_sources_are_invalid_input() {
        let provider = Arc::new(StubRoutingProvider::new());

        let err = engine(&provider)
            .resolve_routes(
                &strings(&[SOURCE, SOURCE]),
                &strings(&[DST_A]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "MissingSourceParameter");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn missing_destinations_are_invalid_input() {
        let provider = Arc::new(StubRoutingProvider::new());

        let err = engine(&provider)
            .resolve_routes(&strings(&[SOURCE]), &[], &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "MissingDestinationParameter");
    }

    #[tokio::test]
    async fn out_of_range_source_fails_before_any_call() {
        let provider = Arc::new(StubRoutingProvider::new().with_route(DST_A, 1.0, 1.0));

        let err = engine(&provider)
            .resolve_routes(
                &strings(&["200,200"]),
                &strings(&[DST_A]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::InvalidInput);
        assert_eq!(err.code(), "InvalidSourceParameter");
        assert!(err.public_message().contains("200,200"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn any_invalid_destination_fails_before_any_call() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_route(DST_A, 1.0, 1.0)
                .with_route(DST_B, 1.0, 1.0),
        );

        let err = engine(&provider)
            .resolve_routes(
                &strings(&[SOURCE]),
                &strings(&[DST_A, DST_B, "13.4;52.5"]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "InvalidDestinationParameter");
        assert!(err.public_message().contains("long,lat"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn provider_invalid_input_fails_whole_request() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_delayed_route(DST_A, 1.0, 1.0, Duration::from_millis(200))
                .with_error(DST_B, ProviderError::invalid_input())
                .with_delayed_route(DST_C, 1.0, 1.0, Duration::from_millis(200)),
        );

        let result = engine(&provider)
            .resolve_routes(
                &strings(&[SOURCE]),
                &strings(&[DST_A, DST_B, DST_C]),
                &CancellationToken::new(),
            )
            .await;
        let err = assert_err!(result);

        assert_eq!(err.class(), ErrorClass::InvalidInput);
        assert_eq!(err.code(), "InvalidParameters");
    }

    #[tokio::test]
    async fn provider_failures_are_redacted() {
        let provider = Arc::new(StubRoutingProvider::new().with_error(
            DST_A,
            ProviderError::service_failure("NoSegment", "secret upstream detail"),
        ));

        let err = engine(&provider)
            .resolve_routes(
                &strings(&[SOURCE]),
                &strings(&[DST_A]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::InternalFailure);
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
        assert!(!err.to_string().contains("secret upstream detail"));
    }

    #[tokio::test]
    async fn timeouts_are_internal_failures() {
        let provider =
            Arc::new(StubRoutingProvider::new().with_error(DST_A, ProviderError::timeout(2000)));

        let err = engine(&provider)
            .resolve_routes(
                &strings(&[SOURCE]),
                &strings(&[DST_A]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::InternalFailure);
        assert_eq!(err.code(), "InternalServerError");
    }

    #[tokio::test]
    async fn collect_routes_keeps_input_order() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_delayed_route(DST_A, 1.0, 1.0, Duration::from_millis(60))
                .with_delayed_route(DST_B, 2.0, 2.0, Duration::ZERO)
                .with_delayed_route(DST_C, 3.0, 3.0, Duration::from_millis(30)),
        );

        let routes = engine(&provider)
            .collect_routes(
                SOURCE.parse().unwrap(),
                &coordinates(&[DST_A, DST_B, DST_C]),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let destinations: Vec<&str> = routes.iter().map(Route::destination).collect();
        assert_eq!(destinations, vec![DST_A, DST_B, DST_C]);
    }

    #[tokio::test]
    async fn first_error_cancels_slow_siblings() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_delayed_route(DST_A, 1.0, 1.0, Duration::from_secs(5))
                .with_error(DST_B, ProviderError::invalid_input())
                .with_delayed_route(DST_C, 1.0, 1.0, Duration::from_secs(5)),
        );

        let started = Instant::now();
        let err = engine(&provider)
            .collect_routes(
                SOURCE.parse().unwrap(),
                &coordinates(&[DST_A, DST_B, DST_C]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(started.elapsed() < Duration::from_secs(2));
        // Only the failing call ran to completion.
        assert_eq!(provider.completed(), 1);
    }

    #[tokio::test]
    async fn exactly_one_error_surfaces_when_all_fail() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_error(DST_A, ProviderError::service_failure("NoRoute", "a"))
                .with_error(DST_B, ProviderError::invalid_input())
                .with_error(DST_C, ProviderError::transport("c")),
        );

        let err = engine(&provider)
            .collect_routes(
                SOURCE.parse().unwrap(),
                &coordinates(&[DST_A, DST_B, DST_C]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(
            matches!(
                err,
                ProviderError::ServiceFailure { .. }
                    | ProviderError::InvalidInput { .. }
                    | ProviderError::Transport { .. }
            ),
            "unexpected error {err:?}"
        );
    }

    #[tokio::test]
    async fn earliest_failure_wins_over_later_ones() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_delayed_error(
                    DST_A,
                    ProviderError::transport("late"),
                    Duration::from_millis(150),
                )
                .with_delayed_error(
                    DST_B,
                    ProviderError::invalid_input(),
                    Duration::from_millis(10),
                )
                .with_delayed_route(DST_C, 1.0, 1.0, Duration::from_secs(5)),
        );

        let err = engine(&provider)
            .collect_routes(
                SOURCE.parse().unwrap(),
                &coordinates(&[DST_A, DST_B, DST_C]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(
            matches!(err, ProviderError::InvalidInput { detail: None }),
            "unexpected error {err:?}"
        );
        // The later failure was cancelled before it could complete.
        assert_eq!(provider.completed(), 1);
    }

    #[tokio::test]
    async fn caller_cancellation_aborts_calls() {
        let provider = Arc::new(
            StubRoutingProvider::new()
                .with_delayed_route(DST_A, 1.0, 1.0, Duration::from_secs(5))
                .with_delayed_route(DST_B, 1.0, 1.0, Duration::from_secs(5)),
        );
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let err = engine(&provider)
            .resolve_routes(&strings(&[SOURCE]), &strings(&[DST_A, DST_B]), &cancel)
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::InternalFailure);
        assert!(err.to_string().contains("cancelled"));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(provider.completed(), 0);
    }

    #[tokio::test]
    async fn already_cancelled_token_issues_no_calls() {
        let provider = Arc::new(StubRoutingProvider::new().with_route(DST_A, 1.0, 1.0));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = engine(&provider)
            .collect_routes(SOURCE.parse().unwrap(), &coordinates(&[DST_A]), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Cancelled));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn overall_deadline_is_enforced() {
        let provider = Arc::new(StubRoutingProvider::new().with_delayed_route(
            DST_A,
            1.0,
            1.0,
            Duration::from_secs(5),
        ));
        let engine = RouteAggregationEngine::new(
            Arc::clone(&provider) as Arc<dyn RoutingProvider>,
            Arc::new(FastestRouteStrategy::new()),
            AggregationConfig::with_timeout(50),
        );

        let err = engine
            .resolve_routes(
                &strings(&[SOURCE]),
                &strings(&[DST_A]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::InternalFailure);
        assert_eq!(provider.completed(), 0);
    }

    #[test]
    fn first_error_keeps_only_first() {
        let holder = FirstError::default();
        assert!(holder.record(ProviderError::invalid_input()));
        assert!(!holder.record(ProviderError::timeout(1)));
        assert!(holder.get().unwrap().is_invalid_input());
    }

    #[test]
    fn aggregation_config_default() {
        let config = AggregationConfig::default();
        assert_eq!(config.request_timeout_ms, 10000);
        assert_eq!(AggregationConfig::with_timeout(500).request_timeout_ms, 500);
    }

    #[test]
    fn engine_accessors() {
        let provider = Arc::new(StubRoutingProvider::new());
        let engine = engine(&provider);
        assert_eq!(engine.ranking_strategy_name(), "FastestRoute");
        assert_eq!(engine.config(), &AggregationConfig::default());
    }
}
