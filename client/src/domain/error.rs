//! Crate-wide error type returned by client services.

use thiserror::Error;

use super::application::ValidationReport;
use super::ports::{GatewayError, SessionStoreError};

/// Failure surfaced by a client service call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The application form failed local validation.
    #[error("form validation failed: {0}")]
    Validation(ValidationReport),
    /// The platform rejected the stored token; the session has been cleared.
    #[error("authentication expired")]
    AuthExpired,
    /// Any other request, decoding, or storage failure.
    #[error("{message}")]
    Request {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl ClientError {
    /// Build a request failure from a displayable message.
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }
}

impl From<GatewayError> for ClientError {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::AuthExpired => Self::AuthExpired,
            GatewayError::Request { message } => Self::Request { message },
        }
    }
}

impl From<SessionStoreError> for ClientError {
    fn from(value: SessionStoreError) -> Self {
        Self::Request {
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_auth_expiry_maps_to_auth_expired() {
        assert_eq!(
            ClientError::from(GatewayError::AuthExpired),
            ClientError::AuthExpired
        );
    }

    #[test]
    fn store_errors_keep_their_context() {
        let err = ClientError::from(SessionStoreError::with_context("disk full"));
        assert_eq!(err.to_string(), "session store failure: disk full");
    }
}
