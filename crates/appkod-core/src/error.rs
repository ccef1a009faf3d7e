//! Unified error handling for Appkod Core.
//!
//! Wraps domain and application errors, plus the validation report itself so
//! a service can hand back one `AppkodResult` for "could not load" and
//! "loaded but invalid" alike.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, ValidationReport};

/// Root error type for Appkod Core operations.
#[derive(Debug, Error, Clone)]
pub enum AppkodError {
    /// Errors from the domain layer (bad entity names, registry invariants).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading, parsing).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// The document was read but did not validate.
    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl AppkodError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Validation(report) => vec![
                format!("Fix the {} issue(s) listed above", report.len()),
                "Paths are dotted: 'database.tables.0.fields.1' is the second field of the first table".into(),
            ],
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Appkod".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The validation report, when this error carries one.
    pub fn as_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::StoreLockError))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type AppkodResult<T> = Result<T, AppkodError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentPath, ValidationIssue};
    use std::path::PathBuf;

    #[test]
    fn validation_error_keeps_report() {
        let report = ValidationReport::new(vec![ValidationIssue::structural(
            DocumentPath::root().key("name"),
            "Required",
        )]);
        let err = AppkodError::from(report.clone());

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.as_report(), Some(&report));
        assert!(err.suggestions()[0].contains("1 issue"));
    }

    #[test]
    fn categories_follow_layers() {
        let not_found: AppkodError = ApplicationError::DocumentNotFound {
            path: PathBuf::from("blueprint.yaml"),
        }
        .into();
        assert_eq!(not_found.category(), ErrorCategory::NotFound);

        let unknown: AppkodError = DomainError::UnknownEntity {
            name: "widget".into(),
        }
        .into();
        assert_eq!(unknown.category(), ErrorCategory::NotFound);
        assert!(!unknown.is_retryable());

        assert!(AppkodError::from(ApplicationError::StoreLockError).is_retryable());
    }
}
