//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Coordinate`]: longitude/latitude pair checked against WGS84 ranges

pub mod coordinate;

pub use coordinate::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE};
