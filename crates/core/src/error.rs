//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: callers report it and carry on. An operation
/// that returns one of these has left the ledger and the queue untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The referenced item is not present in the ledger.
    #[error("item {0} not found")]
    NotFound(ItemId),

    /// A value failed validation (e.g. malformed input at the boundary).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn not_found(id: ItemId) -> Self {
        Self::NotFound(id)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_the_item_id() {
        let err = DomainError::not_found(ItemId::new(42));
        assert_eq!(err.to_string(), "item 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_is_not_a_not_found() {
        assert!(!DomainError::validation("quantity must be positive").is_not_found());
    }
}
