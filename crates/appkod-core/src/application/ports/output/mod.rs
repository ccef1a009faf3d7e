//! Driven (output) ports - implemented by infrastructure.
//!
//! The `appkod-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::Document;
use crate::error::AppkodResult;

/// Port for turning a stored document into a [`Document`] tree.
///
/// Implemented by:
/// - `appkod_adapters::loader::FileDocumentLoader` (YAML/JSON on disk)
/// - `appkod_adapters::loader::MemoryDocumentLoader` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait DocumentLoader: Send + Sync {
    /// Load and parse the document at `path`.
    fn load(&self, path: &Path) -> AppkodResult<Document>;
}
