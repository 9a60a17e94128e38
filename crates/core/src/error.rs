//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Every variant
/// is a request rejection: none of them leaves a partial mutation behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Input failed validation (missing, malformed or out-of-order fields).
    ///
    /// The message names the violated rule and is safe to show to the caller.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The registry already holds `capacity` records.
    #[error("registry is full (capacity: {capacity})")]
    CapacityExceeded { capacity: usize },

    /// A requested record does not exist.
    #[error("not found")]
    NotFound,

    /// The billing engine was handed a negative or non-finite consumption.
    ///
    /// Unreachable through the registry; seeing it means an invariant broke
    /// somewhere upstream.
    #[error("invalid consumption: {0}")]
    InvalidConsumption(f64),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::CapacityExceeded { capacity }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether the caller can fix this by changing the request.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::CapacityExceeded { .. } | Self::InvalidId(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_carries_the_rule() {
        let err = DomainError::validation("full_name is required");
        assert_eq!(err.to_string(), "validation failed: full_name is required");
    }

    #[test]
    fn capacity_exceeded_reports_the_limit() {
        let err = DomainError::capacity_exceeded(50);
        assert_eq!(err.to_string(), "registry is full (capacity: 50)");
        assert!(err.is_user_correctable());
    }

    #[test]
    fn invalid_consumption_is_not_user_correctable() {
        assert!(!DomainError::InvalidConsumption(-1.0).is_user_correctable());
        assert!(!DomainError::not_found().is_user_correctable());
    }
}
