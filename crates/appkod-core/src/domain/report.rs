//! Validation results as data.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::document::Document;
use super::path::DocumentPath;

/// Which pass produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Shape, type, constraint, or depth violation.
    Structural,
    /// A name that does not resolve to a declared entity.
    Referential,
    /// The engine itself failed (a registry/type-model mismatch).
    Internal,
}

/// One path-tagged problem in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: DocumentPath,
    pub message: String,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn structural(path: DocumentPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            kind: IssueKind::Structural,
        }
    }

    pub fn referential(path: DocumentPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            kind: IssueKind::Referential,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            path: DocumentPath::root(),
            message: message.into(),
            kind: IssueKind::Internal,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// An ordered, non-empty list of issues. Returned when a document is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        debug_assert!(!issues.is_empty(), "a report carries at least one issue");
        Self { issues }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationIssue> {
        self.issues.iter()
    }

    /// Whether any issue sits exactly at the given dotted path.
    pub fn has_issue_at(&self, dotted: &str) -> bool {
        self.issues.iter().any(|i| i.path.to_string() == dotted)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.len() {
            1 => write!(f, "Validation failed with 1 issue"),
            n => write!(f, "Validation failed with {n} issues"),
        }
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Result of one structural walk: the defaulted value, or every issue found.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid(Document),
    Invalid(Vec<ValidationIssue>),
}

impl ValidationOutcome {
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn into_result(self) -> Result<Document, ValidationReport> {
        match self {
            Self::Valid(doc) => Ok(doc),
            Self::Invalid(issues) => Err(ValidationReport::new(issues)),
        }
    }
}
