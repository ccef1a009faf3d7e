//! Application layer errors.
//!
//! These errors represent failures in getting a document to the validator,
//! not problems inside the document. Those are `ValidationReport`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading or routing a document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Failed to read {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    DocumentParse { path: PathBuf, reason: String },

    #[error("Unsupported document format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Loader state unavailable (lock poisoned, etc.).
    #[error("Document store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DocumentNotFound { path } => vec![
                format!("No file at: {}", path.display()),
                "Check the path, or create a starter with: appkod init".into(),
            ],
            Self::DocumentRead { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that you have read permissions".into(),
            ],
            Self::DocumentParse { .. } => vec![
                "The file is not valid YAML/JSON".into(),
                "Check indentation, quoting and brackets near the reported location".into(),
            ],
            Self::UnsupportedFormat { .. } => vec![
                "Use a .yaml, .yml or .json file".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DocumentNotFound { .. } => ErrorCategory::NotFound,
            Self::DocumentParse { .. } | Self::UnsupportedFormat { .. } => {
                ErrorCategory::Validation
            }
            Self::DocumentRead { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
