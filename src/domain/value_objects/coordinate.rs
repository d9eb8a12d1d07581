//! # Coordinate
//!
//! A validated longitude/latitude pair.
//!
//! Coordinates travel as `"{longitude},{latitude}"` text, both on the
//! inbound API and inside provider URLs. Parsing enforces the geographic
//! ranges so that everything downstream can assume a valid point.
//!
//! # Examples
//!
//! ```
//! use route_service::domain::value_objects::Coordinate;
//!
//! let coordinate: Coordinate = "13.397634,52.529407".parse().unwrap();
//! assert_eq!(coordinate.longitude(), 13.397634);
//! assert_eq!(coordinate.latitude(), 52.529407);
//! assert_eq!(coordinate.to_string(), "13.397634,52.529407");
//!
//! assert!("200,200".parse::<Coordinate>().is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// A point on the globe in WGS84 degrees.
///
/// Immutable once constructed. Non-finite values never pass validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    longitude: f64,
    latitude: f64,
}

impl Coordinate {
    /// Creates a coordinate after checking both ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLongitude` or `DomainError::InvalidLatitude`
    /// when a value is out of range or not finite.
    pub fn new(longitude: f64, latitude: f64) -> DomainResult<Self> {
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(DomainError::invalid_longitude(longitude.to_string()));
        }
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(DomainError::invalid_latitude(latitude.to_string()));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Returns the longitude in degrees.
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the latitude in degrees.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl FromStr for Coordinate {
    type Err = DomainError;

    fn from_str(input: &str) -> DomainResult<Self> {
        let (longitude, latitude) = match input.split(',').collect::<Vec<_>>().as_slice() {
            [longitude, latitude] => (*longitude, *latitude),
            _ => return Err(DomainError::MalformedCoordinate),
        };

        let longitude_value = longitude
            .parse::<f64>()
            .ok()
            .filter(|value| LONGITUDE_RANGE.contains(value))
            .ok_or_else(|| DomainError::invalid_longitude(longitude))?;

        let latitude_value = latitude
            .parse::<f64>()
            .ok()
            .filter(|value| LATITUDE_RANGE.contains(value))
            .ok_or_else(|| DomainError::invalid_latitude(latitude))?;

        Ok(Self {
            longitude: longitude_value,
            latitude: latitude_value,
        })
    }
}

/// Six decimal places, roughly 0.1 m of precision.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.longitude, self.latitude)
    }
}
