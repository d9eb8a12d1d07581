//! # Domain Entities
//!
//! - [`Route`]: travel summary to one destination
//! - [`AggregationResult`]: ranked routes for a whole request

pub mod route;

pub use route::{AggregationResult, Route};
