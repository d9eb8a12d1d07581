//! # Domain Layer
//!
//! Geographic value objects and route entities.
//!
//! Nothing in this layer performs I/O; it only defines the validated types
//! the rest of the service exchanges.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{AggregationResult, Route};
pub use errors::{DomainError, DomainResult};
pub use value_objects::Coordinate;
