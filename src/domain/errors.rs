//! # Domain Errors
//!
//! Validation failures raised while building domain values.
//!
//! # Examples
//!
//! ```
//! use route_service::domain::errors::DomainError;
//!
//! let error = DomainError::invalid_longitude("1300.5");
//! assert!(error.to_string().contains("1300.5"));
//! ```

use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// The coordinate text is not two comma separated parts.
    #[error("invalid longitude and latitude - must be separated by comma - long,lat")]
    MalformedCoordinate,

    /// The longitude is not a number or lies outside [-180, 180].
    #[error("invalid longitude {value:?} - must be a float number between -180 and 180")]
    InvalidLongitude {
        /// The rejected text.
        value: String,
    },

    /// The latitude is not a number or lies outside [-90, 90].
    #[error("invalid latitude {value:?} - must be a float number between -90 and 90")]
    InvalidLatitude {
        /// The rejected text.
        value: String,
    },

    /// A route distance or duration is negative or not finite.
    #[error("invalid route {field}: {value}")]
    InvalidRouteMetric {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl DomainError {
    /// Creates an invalid longitude error.
    #[must_use]
    pub fn invalid_longitude(value: impl Into<String>) -> Self {
        Self::InvalidLongitude {
            value: value.into(),
        }
    }

    /// Creates an invalid latitude error.
    #[must_use]
    pub fn invalid_latitude(value: impl Into<String>) -> Self {
        Self::InvalidLatitude {
            value: value.into(),
        }
    }

    /// Creates an invalid route metric error.
    #[must_use]
    pub fn invalid_route_metric(field: &'static str, value: f64) -> Self {
        Self::InvalidRouteMetric { field, value }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
