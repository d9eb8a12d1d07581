//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These are the errors a caller of the aggregation engine sees. Each one is
//! classified as invalid input (the caller can fix it), provider failure or
//! internal failure.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── InvalidInput { code, message } - Bad or missing coordinates
//! ├── ProviderFailure(String)        - Unexpected provider status
//! └── InternalFailure(String)        - Transport, timeout, cancellation
//! ```
//!
//! # Examples
//!
//! ```
//! use route_service::application::error::{ApplicationError, InputErrorCode};
//! use route_service::infrastructure::routing::ErrorClass;
//!
//! let err = ApplicationError::invalid_input(
//!     InputErrorCode::MissingSourceParameter,
//!     "one src parameter must be specified",
//! );
//! assert_eq!(err.class(), ErrorClass::InvalidInput);
//! assert_eq!(err.code(), "MissingSourceParameter");
//! ```

use crate::infrastructure::routing::error::{ErrorClass, ProviderError};
use std::fmt;
use thiserror::Error;

/// Message returned to callers for every non-input failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "unable to retrieve route for the given coordinates";

/// Wire code for provider and internal failures.
pub const INTERNAL_ERROR_CODE: &str = "InternalServerError";

/// Wire codes for invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputErrorCode {
    /// No source, or more than one.
    MissingSourceParameter,
    /// The source coordinate failed validation.
    InvalidSourceParameter,
    /// No destination given.
    MissingDestinationParameter,
    /// A destination coordinate failed validation.
    InvalidDestinationParameter,
    /// The routing provider rejected the coordinates.
    InvalidParameters,
}

impl InputErrorCode {
    /// Returns the wire code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingSourceParameter => "MissingSourceParameter",
            Self::InvalidSourceParameter => "InvalidSourceParameter",
            Self::MissingDestinationParameter => "MissingDestinationParameter",
            Self::InvalidDestinationParameter => "InvalidDestinationParameter",
            Self::InvalidParameters => "InvalidParameters",
        }
    }
}

impl fmt::Display for InputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application layer error.
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    /// The request carried missing or invalid coordinates.
    #[error("{code}: {message}")]
    InvalidInput {
        /// Wire code.
        code: InputErrorCode,
        /// Caller-facing message.
        message: String,
    },

    /// The routing provider answered with an unexpected status.
    #[error("provider failure: {0}")]
    ProviderFailure(String),

    /// The request could not be completed.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl ApplicationError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(code: InputErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code,
            message: message.into(),
        }
    }

    /// Creates a provider failure error.
    #[must_use]
    pub fn provider_failure(message: impl Into<String>) -> Self {
        Self::ProviderFailure(message.into())
    }

    /// Creates an internal failure error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalFailure(message.into())
    }

    /// Returns the class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInput { .. } => ErrorClass::InvalidInput,
            Self::ProviderFailure(_) => ErrorClass::ProviderFailure,
            Self::InternalFailure(_) => ErrorClass::InternalFailure,
        }
    }

    /// Returns the wire code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { code, .. } => code.as_str(),
            Self::ProviderFailure(_) | Self::InternalFailure(_) => INTERNAL_ERROR_CODE,
        }
    }

    /// Returns the message safe to show to API consumers.
    ///
    /// Provider and internal details are replaced by a generic message.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. } => message,
            Self::ProviderFailure(_) | Self::InternalFailure(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Returns true if this error is an invalid input error.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<ProviderError> for ApplicationError {
    fn from(error: ProviderError) -> Self {
        match &error {
            ProviderError::InvalidInput {
                detail: Some(detail),
            } => Self::invalid_input(
                InputErrorCode::InvalidParameters,
                format!("{error}: {detail}"),
            ),
            ProviderError::InvalidInput { detail: None } => {
                Self::invalid_input(InputErrorCode::InvalidParameters, error.to_string())
            }
            ProviderError::ServiceFailure { .. } => Self::provider_failure(error.to_string()),
            _ => Self::internal(error.to_string()),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_exposes_code_and_message() {
        let err = ApplicationError::invalid_input(
            InputErrorCode::MissingDestinationParameter,
            "at least one dst parameter must be specified",
        );

        assert!(err.is_invalid_input());
        assert_eq!(err.class(), ErrorClass::InvalidInput);
        assert_eq!(err.code(), "MissingDestinationParameter");
        assert_eq!(
            err.public_message(),
            "at least one dst parameter must be specified"
        );
    }

    #[test]
    fn internal_details_are_not_public() {
        let err = ApplicationError::internal("connection refused to 10.0.0.1:5000");
        assert_eq!(err.code(), INTERNAL_ERROR_CODE);
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.to_string().contains("connection refused"));

        let err = ApplicationError::provider_failure("code \"NoRoute\"");
        assert_eq!(err.class(), ErrorClass::ProviderFailure);
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn from_provider_invalid_input() {
        let err = ApplicationError::from(ProviderError::invalid_input_with_detail(
            "Invalid coordinate value.",
        ));

        assert_eq!(err.code(), "InvalidParameters");
        assert!(err.public_message().contains("Invalid coordinate value."));
        assert!(err.public_message().contains("check longitude and latitude"));
    }

    #[test]
    fn from_provider_service_failure() {
        let err = ApplicationError::from(ProviderError::service_failure("NoRoute", "nope"));
        assert_eq!(err.class(), ErrorClass::ProviderFailure);
    }

    #[test]
    fn from_provider_transport_failures() {
        for provider_error in [
            ProviderError::timeout(2000),
            ProviderError::transport("reset"),
            ProviderError::decode("eof"),
            ProviderError::Cancelled,
        ] {
            let err = ApplicationError::from(provider_error);
            assert_eq!(err.class(), ErrorClass::InternalFailure);
        }
    }

    #[test]
    fn input_error_code_display() {
        assert_eq!(
            InputErrorCode::InvalidSourceParameter.to_string(),
            "InvalidSourceParameter"
        );
        assert_eq!(
            InputErrorCode::InvalidDestinationParameter.as_str(),
            "InvalidDestinationParameter"
        );
    }
}
