//! Document loader adapters.
//!
//! Both loaders pick the parser from the file extension and produce the same
//! [`Document`] tree, so YAML and JSON Blueprints validate identically.

mod file;
mod memory;

pub use file::FileDocumentLoader;
pub use memory::MemoryDocumentLoader;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use appkod_core::{application::ApplicationError, domain::Document, error::AppkodResult};

/// Component nesting both parsers accept. Past this their own recursion limit
/// (128 levels of mappings and sequences) rejects the file as a parse error, so
/// a validator depth bound above it is only reachable for in-memory documents.
pub const PARSABLE_COMPONENT_NESTING: usize = 60;

/// On-disk serialization of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    /// Pick the format from the path's extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Result<Self, ApplicationError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ApplicationError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    /// Parse `text`, attributing failures to `path`.
    pub fn parse(self, text: &str, path: &Path) -> AppkodResult<Document> {
        let parsed = match self {
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| {
            ApplicationError::DocumentParse {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        })
    }

    /// Serialize a document in this format.
    pub fn render(self, document: &Document) -> AppkodResult<String> {
        let rendered = match self {
            Self::Yaml => serde_yaml::to_string(document).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(document)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| e.to_string()),
        };

        rendered.map_err(|message| appkod_core::error::AppkodError::Internal { message })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appkod_core::error::AppkodError;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("app.yaml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("app.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("dir/app.json")).unwrap(),
            DocumentFormat::Json
        );

        let err = DocumentFormat::from_path(Path::new("app.toml")).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::UnsupportedFormat { ref extension, .. } if extension == "toml"
        ));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let err = DocumentFormat::Json
            .parse("{ not json", Path::new("broken.json"))
            .unwrap_err();

        match err {
            AppkodError::Application(ApplicationError::DocumentParse { path, reason }) => {
                assert_eq!(path, Path::new("broken.json"));
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// One page holding a component `levels` deep, as JSON text (also valid YAML).
    fn nested_components(levels: usize) -> String {
        let mut component = r#"{"type": "card"}"#.to_string();
        for _ in 1..levels {
            component = format!(r#"{{"type": "container", "children": [{component}]}}"#);
        }
        format!(r#"{{"ui": {{"pages": [{{"components": [{component}]}}]}}}}"#)
    }

    #[test]
    fn parsers_stop_past_the_component_nesting_they_accept() {
        let accepted = nested_components(PARSABLE_COMPONENT_NESTING);
        let rejected = nested_components(PARSABLE_COMPONENT_NESTING + 10);

        for format in [DocumentFormat::Yaml, DocumentFormat::Json] {
            assert!(format.parse(&accepted, Path::new("deep")).is_ok(), "{format}");

            let err = format.parse(&rejected, Path::new("deep")).unwrap_err();
            assert!(
                matches!(err, AppkodError::Application(ApplicationError::DocumentParse { .. })),
                "{format}: {err:?}"
            );
        }
    }

    #[test]
    fn yaml_and_json_render_the_same_tree() {
        let document = DocumentFormat::Yaml
            .parse("name: crm\ntags: [a, b]\nsize: 3\n", Path::new("a.yaml"))
            .unwrap();

        for format in [DocumentFormat::Yaml, DocumentFormat::Json] {
            let text = format.render(&document).unwrap();
            assert_eq!(format.parse(&text, Path::new("b")).unwrap(), document);
        }
    }
}
