//! In-memory document loader for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use appkod_core::{
    application::{ApplicationError, ports::DocumentLoader},
    domain::Document,
    error::AppkodResult,
};

use super::DocumentFormat;

/// Holds raw document text keyed by path. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentLoader {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryDocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` at `path`, replacing anything already there.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) -> AppkodResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        files.insert(path.into(), content.into());
        Ok(())
    }

    #[must_use]
    pub fn with(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.files.read().map_or(0, |files| files.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentLoader for MemoryDocumentLoader {
    fn load(&self, path: &Path) -> AppkodResult<Document> {
        let format = DocumentFormat::from_path(path)?;
        let text = {
            let files = self
                .files
                .read()
                .map_err(|_| ApplicationError::StoreLockError)?;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| ApplicationError::DocumentNotFound {
                    path: path.to_path_buf(),
                })?
        };

        format.parse(&text, path)
    }
}
