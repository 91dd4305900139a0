//! Error taxonomy for API calls.
//!
//! Every failure a deferred result can carry is an [`ApiError`]. The three
//! business kinds (`EntityNotFound`, `Unprocessable`, `Api`) are produced only
//! by [`ApiError::from_status`]; resource facades never build their own.

use thiserror::Error;

/// Errors surfaced by API calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The referenced identifier does not exist (HTTP 404).
    #[error("Entity not found: {message}")]
    EntityNotFound {
        /// Diagnostic text supplied by the server.
        message: String,
    },

    /// The request was well-formed but violates a business rule (HTTP 422).
    #[error("Unprocessable request: {message}")]
    Unprocessable {
        /// Diagnostic text supplied by the server.
        message: String,
    },

    /// Any other non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Diagnostic text supplied by the server.
        message: String,
    },

    /// A success response whose body does not match the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// The request could not be delivered or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request could not be built from the supplied parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    /// The dispatched call ended without resolving its result.
    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}

/// Failure kind selected for a non-success status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 404.
    EntityNotFound,
    /// HTTP 422.
    Unprocessable,
    /// Everything else.
    Generic,
}

impl FailureKind {
    /// Classify a non-success status code.
    #[must_use]
    pub const fn classify(status: u16) -> Self {
        match status {
            404 => Self::EntityNotFound,
            422 => Self::Unprocessable,
            _ => Self::Generic,
        }
    }
}

impl ApiError {
    /// Map a rejected response to its typed failure.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match FailureKind::classify(status) {
            FailureKind::EntityNotFound => Self::EntityNotFound { message },
            FailureKind::Unprocessable => Self::Unprocessable { message },
            FailureKind::Generic => Self::Api { status, message },
        }
    }

    /// HTTP status code carried by this error, if it came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::EntityNotFound { .. } => Some(404),
            Self::Unprocessable { .. } => Some(422),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server diagnostic text for business failures.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::EntityNotFound { message }
            | Self::Unprocessable { message }
            | Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(404, FailureKind::EntityNotFound ; "not found")]
    #[test_case(422, FailureKind::Unprocessable ; "unprocessable")]
    #[test_case(400, FailureKind::Generic ; "bad request")]
    #[test_case(401, FailureKind::Generic ; "unauthorized")]
    #[test_case(403, FailureKind::Generic ; "forbidden")]
    #[test_case(429, FailureKind::Generic ; "rate limited")]
    #[test_case(500, FailureKind::Generic ; "server error")]
    #[test_case(503, FailureKind::Generic ; "unavailable")]
    fn classify_status(status: u16, expected: FailureKind) {
        assert_eq!(FailureKind::classify(status), expected);
    }

    #[test]
    fn not_found_keeps_message() {
        let err = ApiError::from_status(404, "Order not found");
        assert_eq!(
            err,
            ApiError::EntityNotFound {
                message: "Order not found".to_string()
            }
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn unprocessable_keeps_message_unchanged() {
        let err = ApiError::from_status(422, "The order status is not cancelable");
        assert_eq!(err.message(), Some("The order status is not cancelable"));
        assert!(matches!(err, ApiError::Unprocessable { .. }));
    }

    #[test]
    fn generic_failure_carries_status() {
        let err = ApiError::from_status(403, "forbidden");
        assert_eq!(
            err,
            ApiError::Api {
                status: 403,
                message: "forbidden".to_string()
            }
        );
    }

    #[test]
    fn decode_and_transport_have_no_status() {
        assert_eq!(ApiError::Decode("bad".to_string()).status(), None);
        assert_eq!(ApiError::Transport("refused".to_string()).status(), None);
        assert_eq!(ApiError::Transport("refused".to_string()).message(), None);
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::from_status(500, "boom");
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }
}
