//! Unified error types for the domain layer
//!
//! Provides a common error type for record normalization, collection
//! mutations and query parsing, so adapters never need to fall back to
//! String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., blank name, no types selected)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for user-correctable input problems.
    ///
    /// Use this when a create/update form is missing required data:
    /// - The name is blank after trimming
    /// - No type tag survived splitting
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Name is required"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for SortDirection {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "asc" => Ok(Self::Ascending),
    ///             _ => Err(DomainError::parse(format!("Unknown sort direction: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("Name is required");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: Name is required");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Record", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: Record with id 42");
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("duplicate record id 7");
        assert!(matches!(err, DomainError::Constraint(_)));
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Constraint violation: duplicate record id 7");
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown sort field: speed");
        assert_eq!(err.to_string(), "Parse error: Unknown sort field: speed");
    }
}
