//! # Provider Errors
//!
//! Error types for routing provider calls.
//!
//! Every failure of a single origin/destination request lands in one of
//! three classes: the provider rejected the coordinates (invalid input), the
//! provider answered with an unexpected status (provider failure), or the
//! call itself broke down (internal failure: timeout, transport, decoding,
//! cancellation).
//!
//! # Examples
//!
//! ```
//! use route_service::infrastructure::routing::error::{ErrorClass, ProviderError};
//!
//! let error = ProviderError::timeout(2000);
//! assert_eq!(error.class(), ErrorClass::InternalFailure);
//!
//! let error = ProviderError::service_failure("NoRoute", "Impossible route between points");
//! assert!(error.is_provider_failure());
//! ```

use std::fmt;
use thiserror::Error;

/// Caller-facing class of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The caller can fix the request.
    InvalidInput,
    /// The provider answered with an unexpected status.
    ProviderFailure,
    /// Transport, timeout, decoding or cancellation.
    InternalFailure,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "INVALID_INPUT"),
            Self::ProviderFailure => write!(f, "PROVIDER_FAILURE"),
            Self::InternalFailure => write!(f, "INTERNAL_FAILURE"),
        }
    }
}

/// Error type for routing provider operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider rejected the coordinates.
    #[error(
        "the input provided to the routing provider is invalid - check longitude and latitude values"
    )]
    InvalidInput {
        /// Provider message, if any.
        detail: Option<String>,
    },

    /// The provider returned a status code other than `Ok` or `InvalidValue`.
    #[error("the request to the routing provider did not succeed: code {code:?} message {message:?}")]
    ServiceFailure {
        /// Provider status code.
        code: String,
        /// Provider message.
        message: String,
    },

    /// The call exceeded its time budget.
    #[error("request failed: timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Connection or HTTP level failure.
    #[error("request failed: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// HTTP status, when one was received.
        status: Option<u16>,
    },

    /// The response body could not be decoded.
    #[error("failed to read route response: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// The provider reported success but returned no usable route.
    #[error("routing provider returned no usable route: {message}")]
    MissingRoute {
        /// Error message.
        message: String,
    },

    /// The call was abandoned because the request was cancelled.
    #[error("route request cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input() -> Self {
        Self::InvalidInput { detail: None }
    }

    /// Creates an invalid input error carrying the provider message.
    #[must_use]
    pub fn invalid_input_with_detail(detail: impl Into<String>) -> Self {
        Self::InvalidInput {
            detail: Some(detail.into()),
        }
    }

    /// Creates a service failure error.
    #[must_use]
    pub fn service_failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceFailure {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }

    /// Creates a transport error for an HTTP status.
    #[must_use]
    pub fn transport_with_status(message: impl Into<String>, status: u16) -> Self {
        Self::Transport {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a missing route error.
    #[must_use]
    pub fn missing_route(message: impl Into<String>) -> Self {
        Self::MissingRoute {
            message: message.into(),
        }
    }

    /// Returns the caller-facing class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInput { .. } => ErrorClass::InvalidInput,
            Self::ServiceFailure { .. } => ErrorClass::ProviderFailure,
            Self::Timeout { .. }
            | Self::Transport { .. }
            | Self::Decode { .. }
            | Self::MissingRoute { .. }
            | Self::Cancelled => ErrorClass::InternalFailure,
        }
    }

    /// Returns true if the provider rejected the coordinates.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        self.class() == ErrorClass::InvalidInput
    }

    /// Returns true if the provider answered with an unexpected status.
    #[must_use]
    pub fn is_provider_failure(&self) -> bool {
        self.class() == ErrorClass::ProviderFailure
    }

    /// Returns true if the call failed before a usable answer arrived.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.class() == ErrorClass::InternalFailure
    }

    /// Returns the provider status code, if any.
    #[must_use]
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::ServiceFailure { code, .. } => Some(code),
            Self::InvalidInput { .. } => Some("InvalidValue"),
            _ => None,
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
