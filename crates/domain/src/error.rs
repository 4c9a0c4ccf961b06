//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
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
    /// Creates a validation error for malformed input.
    ///
    /// Use this when a value cannot be constructed at all:
    /// - Required fields are empty or missing
    /// - Values exceed length limits
    /// - Slugs are not in canonical form
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Region name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a constraint violation for well-formed input that breaks a rule
    /// of the surrounding aggregate (duplicate names, reserved values).
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for PolicyMode {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "strict" => Ok(Self::Strict),
    ///             _ => Err(DomainError::parse(format!("Unknown policy mode: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// The human-readable message without the category prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Constraint(msg) | Self::Parse(msg) => msg.clone(),
            Self::NotFound { entity_type, id } => format!("{} not found: {}", entity_type, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Region", "Ottawa");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Region"));
        assert!(err.to_string().contains("Ottawa"));
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("region already exists");
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(err.to_string(), "Constraint violation: region already exists");
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = DomainError::constraint("region already exists");
        assert_eq!(err.message(), "region already exists");
    }
}
