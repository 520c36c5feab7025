//! Domain error taxonomy
//!
//! Every failure crossing a use-case boundary is one of these variants.
//! Callers branch on `kind()` - never on message text. Storage-driver
//! errors are wrapped before they leave the persistence layer, so no
//! raw sqlx error ever reaches a caller.

use rust_decimal::Decimal;
use thiserror::Error;

/// Stable, comparable classification of a `DomainError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    NotFound,
    LimitExceeded,
    Conflict,
    Unauthorized,
    InternalFailure,
}

/// Domain errors for the financing core.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("credit limit exceeded: exposure {exposure} + otr {requested} > limit {limit}")]
    LimitExceeded {
        exposure: Decimal,
        requested: Decimal,
        limit: Decimal,
    },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal failure: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result alias used across the workspace.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Internal failure without an underlying cause.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Internal failure wrapping an underlying cause.
    pub fn internal_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Internal { .. } => ErrorKind::InternalFailure,
        }
    }

    /// True for failures a caller may retry unchanged (with backoff).
    ///
    /// `LimitExceeded` is deliberately not retryable: the request has
    /// to change before it can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Conflict | ErrorKind::InternalFailure
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            DomainError::InvalidRequest("x".into()).kind(),
            ErrorKind::InvalidRequest
        );
        assert_eq!(
            DomainError::NotFound("consumer".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::internal("boom").kind(),
            ErrorKind::InternalFailure
        );
    }

    #[test]
    fn test_limit_exceeded_message_carries_numbers() {
        let err = DomainError::LimitExceeded {
            exposure: dec!(5000000),
            requested: dec!(6000000),
            limit: dec!(10000000),
        };
        let msg = err.to_string();
        assert!(msg.contains("5000000"));
        assert!(msg.contains("10000000"));
    }

    #[test]
    fn test_retryability() {
        assert!(DomainError::Conflict("dup".into()).is_retryable());
        assert!(DomainError::internal("io").is_retryable());
        assert!(!DomainError::LimitExceeded {
            exposure: dec!(1),
            requested: dec!(1),
            limit: dec!(1),
        }
        .is_retryable());
        assert!(!DomainError::Unauthorized("nope".into()).is_retryable());
    }

    #[test]
    fn test_internal_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timeout");
        let err = DomainError::internal_with("query failed", io);
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("socket timeout"));
    }
}
