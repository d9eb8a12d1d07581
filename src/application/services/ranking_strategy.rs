//! # Ranking Strategy
//!
//! Strategies for ordering resolved routes.
//!
//! This module provides the [`RankingStrategy`] trait and the default
//! [`FastestRouteStrategy`], which orders routes by duration and breaks ties
//! on distance.

use crate::domain::entities::Route;
use std::cmp::Ordering;
use std::fmt;

/// Trait for ranking strategies.
///
/// Implementations must impose a total order so that any stable sort gives
/// the same output for the same input.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Orders the routes best first.
    fn rank(&self, routes: Vec<Route>) -> Vec<Route>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Fastest route first.
///
/// Sorts by duration ascending, then by distance ascending. Routes equal on
/// both keys keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastestRouteStrategy;

impl FastestRouteStrategy {
    /// Creates a new fastest route strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Lexicographic comparison on (duration, distance).
    #[must_use]
    pub fn compare(a: &Route, b: &Route) -> Ordering {
        a.duration()
            .total_cmp(&b.duration())
            .then_with(|| a.distance().total_cmp(&b.distance()))
    }
}

impl RankingStrategy for FastestRouteStrategy {
    fn rank(&self, mut routes: Vec<Route>) -> Vec<Route> {
        routes.sort_by(Self::compare);
        routes
    }

    fn name(&self) -> &'static str {
        "FastestRoute"
    }
}
