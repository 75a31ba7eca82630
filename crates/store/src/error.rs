//! Store error types.

use thiserror::Error;

/// Errors surfaced by a store implementation.
///
/// All store calls cross a network boundary that can fail transiently; none
/// of these are fatal to the process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (connection refused, timeout,
    /// TLS failure).
    #[error("Transport error calling {endpoint}: {message}")]
    Transport {
        /// The endpoint being called.
        endpoint: String,
        /// Human-readable cause.
        message: String,
    },

    /// The remote API answered with an unexpected status code.
    #[error("Unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// The endpoint being called.
        endpoint: String,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode {
        /// The endpoint being called.
        endpoint: String,
        /// Human-readable cause.
        message: String,
    },

    /// The referenced record does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            Self::Decode { .. } | Self::NotFound(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_is_retryable() {
        let err = StoreError::Transport {
            endpoint: "wallet/transactions/".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_server_errors_retryable_client_errors_not() {
        let server = StoreError::UnexpectedStatus {
            status: 503,
            endpoint: "wallet/vision/".to_string(),
            body: String::new(),
        };
        let client = StoreError::UnexpectedStatus {
            status: 400,
            endpoint: "wallet/vision/".to_string(),
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
        assert!(!StoreError::NotFound("x".to_string()).is_retryable());
    }
}
