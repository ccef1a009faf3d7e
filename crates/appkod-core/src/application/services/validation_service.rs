//! Validation Service - load a document and run it through the engine.
//!
//! 1. Load the document through the `DocumentLoader` port
//! 2. Validate it as a Blueprint or as a named platform contract
//! 3. Summarize the result for display

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::DocumentLoader,
    domain::{Blueprint, BlueprintValidator, Document, Entity, ValidatorOptions},
    error::AppkodResult,
};

/// Headline facts about a valid Blueprint, for verbose output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintSummary {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tables: usize,
    pub pages: usize,
    pub endpoints: usize,
    pub workflows: usize,
    pub connectors: usize,
}

impl From<&Blueprint> for BlueprintSummary {
    fn from(blueprint: &Blueprint) -> Self {
        Self {
            name: blueprint.name.clone(),
            version: blueprint.version.clone(),
            description: blueprint.description.clone(),
            tables: blueprint.table_count(),
            pages: blueprint.page_count(),
            endpoints: blueprint.endpoint_count(),
            workflows: blueprint.workflows.as_ref().map_or(0, Vec::len),
            connectors: blueprint.connectors.as_ref().map_or(0, Vec::len),
        }
    }
}

/// Service for validating stored documents.
pub struct ValidationService {
    loader: Box<dyn DocumentLoader>,
    options: ValidatorOptions,
}

impl ValidationService {
    pub fn new(loader: Box<dyn DocumentLoader>) -> Self {
        Self {
            loader,
            options: ValidatorOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Load and validate a Blueprint file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn validate_blueprint_file(&self, path: impl AsRef<Path>) -> AppkodResult<Blueprint> {
        let document = self.loader.load(path.as_ref())?;
        self.validate_blueprint(&document)
    }

    /// Validate an already loaded Blueprint document.
    pub fn validate_blueprint(&self, document: &Document) -> AppkodResult<Blueprint> {
        match self.validator().validate(document) {
            Ok(blueprint) => {
                info!(
                    name = %blueprint.name,
                    tables = blueprint.table_count(),
                    pages = blueprint.page_count(),
                    endpoints = blueprint.endpoint_count(),
                    "Blueprint is valid"
                );
                Ok(blueprint)
            }
            Err(report) => {
                warn!(issues = report.len(), "Blueprint failed validation");
                for issue in &report {
                    debug!(path = %issue.path, kind = ?issue.kind, "{}", issue.message);
                }
                Err(report.into())
            }
        }
    }

    /// Load a file and validate it against a named platform contract.
    ///
    /// Returns the document with defaults applied.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), entity = %entity))]
    pub fn validate_contract_file(
        &self,
        entity: Entity,
        path: impl AsRef<Path>,
    ) -> AppkodResult<Document> {
        let document = self.loader.load(path.as_ref())?;
        let defaulted = self
            .validator()
            .validate_contract(entity, &document)
            .inspect_err(|report| warn!(issues = report.len(), "Contract failed validation"))?;

        info!("Contract is valid");
        Ok(defaulted)
    }

    fn validator(&self) -> BlueprintValidator<'static> {
        BlueprintValidator::new().with_options(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockDocumentLoader};
    use crate::domain::IssueKind;
    use crate::error::{AppkodError, ErrorCategory};
    use mockall::predicate::eq;
    use std::path::PathBuf;

    fn minimal_blueprint() -> Document {
        serde_yaml::from_str(
            r"
version: '1.0.0'
name: Tiny
description: One table, one page
database:
  tables:
    - name: notes
      fields:
        - name: title
          type: string
ui:
  pages:
    - path: /
      title: Notes
      components:
        - type: table
          source: notes
api:
  endpoints:
    - method: GET
      path: /notes
      table: notes
",
        )
        .expect("fixture parses")
    }

    fn service_with(document: Document) -> ValidationService {
        let mut loader = MockDocumentLoader::new();
        loader
            .expect_load()
            .with(eq(PathBuf::from("blueprint.yaml")))
            .times(1)
            .returning(move |_| Ok(document.clone()));
        ValidationService::new(Box::new(loader))
    }

    #[test]
    fn validates_loaded_blueprint() {
        let service = service_with(minimal_blueprint());

        let blueprint = service.validate_blueprint_file("blueprint.yaml").unwrap();
        let summary = BlueprintSummary::from(&blueprint);

        assert_eq!(summary.name, "Tiny");
        assert_eq!(summary.version, "1.0.0");
        assert_eq!(summary.description.as_deref(), Some("One table, one page"));
        assert_eq!((summary.tables, summary.pages, summary.endpoints), (1, 1, 1));
        assert_eq!((summary.workflows, summary.connectors), (0, 0));
    }

    #[test]
    fn invalid_blueprint_surfaces_report() {
        let mut document = minimal_blueprint();
        if let Document::Mapping(map) = &mut document {
            map.remove("database");
        }
        let service = service_with(document);

        let err = service.validate_blueprint_file("blueprint.yaml").unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
        let report = err.as_report().expect("validation error");
        assert!(report.has_issue_at("database"));
        assert_eq!(report.issues()[0].kind, IssueKind::Structural);
    }

    #[test]
    fn loader_errors_pass_through() {
        let mut loader = MockDocumentLoader::new();
        loader.expect_load().returning(|path| {
            Err(ApplicationError::DocumentNotFound {
                path: path.to_path_buf(),
            }
            .into())
        });
        let service = ValidationService::new(Box::new(loader));

        let err = service.validate_blueprint_file("missing.yaml").unwrap_err();

        assert!(matches!(
            err,
            AppkodError::Application(ApplicationError::DocumentNotFound { .. })
        ));
    }

    #[test]
    fn contract_file_gets_defaults() {
        let document: Document = serde_yaml::from_str(
            "name: Acme AB\nslug: acme\nbillingEmail: billing@acme.se\n",
        )
        .unwrap();
        let mut loader = MockDocumentLoader::new();
        loader
            .expect_load()
            .returning(move |_| Ok(document.clone()));
        let service = ValidationService::new(Box::new(loader));

        let defaulted = service
            .validate_contract_file(Entity::CreateTenantRequest, "tenant.yaml")
            .unwrap();

        assert_eq!(defaulted.get("plan").and_then(Document::as_str), Some("free"));
        assert_eq!(defaulted.get("country").and_then(Document::as_str), Some("SE"));
    }

    #[test]
    fn depth_option_reaches_validator() {
        let mut document = minimal_blueprint();
        let nested: Document = serde_yaml::from_str(
            "type: container\nchildren:\n  - type: container\n    children:\n      - type: card\n",
        )
        .unwrap();
        if let Some(Document::Sequence(components)) = document_components(&mut document) {
            components.push(nested);
        }
        let service =
            service_with(document).with_options(ValidatorOptions::default().with_max_depth(1));

        let err = service.validate_blueprint_file("blueprint.yaml").unwrap_err();

        let report = err.as_report().expect("validation error");
        assert_eq!(report.len(), 1);
        assert!(report.issues()[0].message.contains("Maximum nesting depth exceeded"));
    }

    fn document_components(document: &mut Document) -> Option<&mut Document> {
        let Document::Mapping(root) = document else {
            return None;
        };
        let Some(Document::Mapping(ui)) = root.get_mut("ui") else {
            return None;
        };
        let Some(Document::Sequence(pages)) = ui.get_mut("pages") else {
            return None;
        };
        let Some(Document::Mapping(page)) = pages.first_mut() else {
            return None;
        };
        page.get_mut("components")
    }
}
