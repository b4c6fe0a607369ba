//! # Error Types
//!
//! Typed errors for checkout-relay.
//!
//! Session creation and event publishing return `Result<T, PaymentError>`.
//! The webhook pipeline never returns an error to its caller; its failure
//! modes (`SignatureError`, `DecodeError`) are carried inside a rejected
//! `HandlingOutcome` instead.

use thiserror::Error;

/// Errors raised by session creation and downstream publishing
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller input violates a request invariant; nothing was sent upstream
    #[error("Validation error: {0}")]
    Validation(String),

    /// The processor answered with a rejection
    #[error("Upstream error [{provider}]: {message}")]
    Upstream { provider: String, message: String },

    /// Transport failure talking to the processor
    #[error("Network error: {0}")]
    Network(String),

    /// The processor answered with a body we could not read
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Downstream publish failed
    #[error("Publish to {topic} failed: {message}")]
    Publish { topic: String, message: String },
}

impl PaymentError {
    /// True for every failure that happened on the processor side of a call.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            PaymentError::Upstream { .. }
                | PaymentError::Network(_)
                | PaymentError::Serialization(_)
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::Validation(_) => 400,
            PaymentError::Upstream { .. } => 502,
            PaymentError::Network(_) => 503,
            PaymentError::Serialization(_) => 502,
            PaymentError::Publish { .. } => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Why a notification failed signature verification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing signature header")]
    MissingHeader,

    #[error("malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("timestamp {timestamp} outside tolerance of {tolerance_secs}s")]
    TimestampOutsideTolerance { timestamp: i64, tolerance_secs: i64 },

    #[error("signature mismatch")]
    Mismatch,
}

/// A verified payload that does not match the processor's event contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payload is not a valid event: {0}")]
    InvalidEvent(String),

    #[error("{kind} object is missing `{field}`")]
    MissingField { kind: String, field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(PaymentError::Network("connection reset".into()).is_upstream());
        assert!(PaymentError::Upstream {
            provider: "stripe".into(),
            message: "Invalid currency: xyz".into()
        }
        .is_upstream());
        assert!(!PaymentError::Validation("no items".into()).is_upstream());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PaymentError::Validation("test".into()).status_code(), 400);
        assert_eq!(
            PaymentError::Upstream {
                provider: "stripe".into(),
                message: "declined".into()
            }
            .status_code(),
            502
        );
        assert_eq!(PaymentError::Network("timeout".into()).status_code(), 503);
    }

    #[test]
    fn test_signature_error_display() {
        let err = SignatureError::TimestampOutsideTolerance {
            timestamp: 1_700_000_000,
            tolerance_secs: 300,
        };
        assert_eq!(
            err.to_string(),
            "timestamp 1700000000 outside tolerance of 300s"
        );
    }
}
