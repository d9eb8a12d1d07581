//! # Application Layer
//!
//! Use cases on top of the domain: request validation, concurrent route
//! resolution and ranking.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, InputErrorCode};
pub use services::{AggregationConfig, RouteAggregationEngine};
