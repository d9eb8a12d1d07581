//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`RouteAggregationEngine`]: Concurrent route resolution and ranking
//! - [`RankingStrategy`]: Strategies for ordering routes

pub mod ranking_strategy;
pub mod route_aggregation;

pub use ranking_strategy::{FastestRouteStrategy, RankingStrategy};
pub use route_aggregation::{AggregationConfig, RouteAggregationEngine};
