//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Raised by pure domain logic (scope and source resolution, argument
/// checks). None of these involve I/O, so they are always detected before
/// any request to the search API is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid scope '{scope}'. Valid scopes: {}", .valid.join(", "))]
    InvalidScope { scope: String, valid: Vec<String> },

    #[error("Unknown source '{source_id}'. Configured sources: {}", .configured.join(", "))]
    UnknownSource {
        source_id: String,
        configured: Vec<String>,
    },

    #[error("No sources configured for {0}")]
    NoSourcesConfigured(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    /// Whether this error comes from missing configuration rather than
    /// from a bad argument.
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::NoSourcesConfigured(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_scope_lists_valid_values() {
        let error = DomainError::InvalidScope {
            scope: "gpu".to_string(),
            valid: vec!["base".to_string(), "net".to_string()],
        };
        assert_eq!(error.to_string(), "Invalid scope 'gpu'. Valid scopes: base, net");
    }

    #[test]
    fn test_is_configuration() {
        assert!(DomainError::NoSourcesConfigured("browse".to_string()).is_configuration());
        assert!(!DomainError::InvalidArgument("x".to_string()).is_configuration());
    }
}
