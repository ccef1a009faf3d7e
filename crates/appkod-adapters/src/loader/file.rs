//! Loads documents from the local filesystem using `std::fs`.

use std::io;
use std::path::Path;

use tracing::{debug, instrument};

use appkod_core::{
    application::{ApplicationError, ports::DocumentLoader},
    domain::Document,
    error::AppkodResult,
};

use super::DocumentFormat;

/// Production loader: reads a `.yaml`/`.yml`/`.json` file from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentLoader;

impl FileDocumentLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for FileDocumentLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> AppkodResult<Document> {
        let format = DocumentFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|e| map_io_error(path, e))?;
        debug!(bytes = text.len(), %format, "Read document");

        format.parse(&text, path)
    }
}

fn map_io_error(path: &Path, e: io::Error) -> ApplicationError {
    match e.kind() {
        io::ErrorKind::NotFound => ApplicationError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => ApplicationError::DocumentRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}
