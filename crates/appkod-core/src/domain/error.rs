// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Domain error type.
///
/// Validation failures of a *document* are not errors of this kind: they are
/// returned as data in a [`ValidationReport`](super::ValidationReport). This
/// enum covers malformed inputs to the domain API itself (an unknown entity
/// name, a bad vocabulary member) and broken registry invariants.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Caller errors
    // ========================================================================
    #[error("Unknown {vocabulary} '{value}' (expected one of: {expected})")]
    UnknownVocabulary {
        vocabulary: &'static str,
        value: String,
        expected: String,
    },

    #[error("Unknown schema entity '{name}'")]
    UnknownEntity { name: String },

    // ========================================================================
    // Registry invariants (programming errors)
    // ========================================================================
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Could not materialize validated {entity}: {reason}")]
    MaterializationFailed { entity: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownVocabulary {
                vocabulary,
                expected,
                ..
            } => vec![
                format!("Use one of the known {vocabulary} values: {expected}"),
                "Values are case-sensitive".into(),
            ],
            Self::UnknownEntity { .. } => vec![
                "List the available entities with: appkod schema".into(),
                "Entity names are kebab-case, e.g. 'create-tenant-request'".into(),
            ],
            Self::InvalidPattern { .. } | Self::MaterializationFailed { .. } => vec![
                "This is a bug in the schema registry".into(),
                "Please report it together with the document that triggered it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownVocabulary { .. } => ErrorCategory::Validation,
            Self::UnknownEntity { .. } => ErrorCategory::NotFound,
            Self::InvalidPattern { .. } | Self::MaterializationFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entity_is_not_found() {
        let err = DomainError::UnknownEntity {
            name: "widget".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("widget"));
        assert!(err.suggestions().iter().any(|s| s.contains("appkod schema")));
    }

    #[test]
    fn registry_errors_are_internal() {
        let err = DomainError::InvalidPattern {
            pattern: "(".into(),
            reason: "unclosed group".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
