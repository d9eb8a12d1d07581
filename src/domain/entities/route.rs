//! # Route Entity
//!
//! A resolved route from the origin to one destination, and the ranked set
//! of routes returned for a whole request.
//!
//! # Examples
//!
//! ```
//! use route_service::domain::entities::Route;
//! use route_service::domain::value_objects::Coordinate;
//!
//! let destination = Coordinate::new(13.397634, 52.529407).unwrap();
//! let route = Route::new(&destination, 1886.8, 251.5).unwrap();
//!
//! assert_eq!(route.destination(), "13.397634,52.529407");
//! assert_eq!(route.duration(), 251.5);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Travel summary to a single destination.
///
/// # Invariants
///
/// - `distance` (meters) and `duration` (seconds) are finite and non-negative
/// - `destination` is the requested coordinate, not the provider's snapped one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRoute")]
pub struct Route {
    destination: String,
    distance: f64,
    duration: f64,
}

#[derive(Deserialize)]
struct RawRoute {
    destination: String,
    distance: f64,
    duration: f64,
}

impl TryFrom<RawRoute> for Route {
    type Error = DomainError;

    fn try_from(raw: RawRoute) -> DomainResult<Self> {
        check_metric("distance", raw.distance)?;
        check_metric("duration", raw.duration)?;
        Ok(Self {
            destination: raw.destination,
            distance: raw.distance,
            duration: raw.duration,
        })
    }
}

impl Route {
    /// Creates a route stamped with the requested destination.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRouteMetric` if the distance or duration
    /// is negative or not finite.
    pub fn new(destination: &Coordinate, distance: f64, duration: f64) -> DomainResult<Self> {
        check_metric("distance", distance)?;
        check_metric("duration", duration)?;
        Ok(Self {
            destination: destination.to_string(),
            distance,
            duration,
        })
    }

    /// Returns the destination as `"{longitude},{latitude}"`.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the distance in meters.
    #[inline]
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the duration in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

fn check_metric(field: &'static str, value: f64) -> DomainResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid_route_metric(field, value))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route(to={} distance={:.1}m duration={:.1}s)",
            self.destination, self.distance, self.duration
        )
    }
}

/// Ranked routes from one source.
///
/// `routes` holds one entry per requested destination, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// The source parameter exactly as the caller sent it.
    pub source: String,
    /// Routes in ranking order.
    pub routes: Vec<Route>,
}

impl AggregationResult {
    /// Creates a new aggregation result.
    #[must_use]
    pub fn new(source: impl Into<String>, routes: Vec<Route>) -> Self {
        Self {
            source: source.into(),
            routes,
        }
    }
}
