//! Locations inside a document.

use std::fmt;

use serde::Serialize;

/// One step into a document: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Path from the document root to a node, e.g. `database.tables.0.fields`.
///
/// Paths are cheap to extend: `key`/`index` return a new path and leave the
/// receiver untouched, so sibling fields never see each other's segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentPath(Vec<PathSegment>);

impl DocumentPath {
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for DocumentPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Build a [`DocumentPath`] from mixed keys and indices.
///
/// ```
/// use appkod_core::path;
/// let p = path!["database", "tables", 0, "fields"];
/// assert_eq!(p.to_string(), "database.tables.0.fields");
/// ```
#[macro_export]
macro_rules! path {
    () => { $crate::domain::DocumentPath::root() };
    ($($segment:expr),+ $(,)?) => {
        $crate::domain::DocumentPath::from(vec![
            $( $crate::domain::PathSegment::from($segment) ),+
        ])
    };
}
