//! Single entry point: structural pass, typed materialization, integrity pass.

use super::document::Document;
use super::entities::Blueprint;
use super::error::DomainError;
use super::integrity::ReferentialIntegrityChecker;
use super::report::{ValidationIssue, ValidationReport};
use super::schema::{Entity, SchemaRegistry};
use super::validator::{StructuralValidator, ValidatorOptions};

/// Validates Blueprints and platform contracts against a registry.
///
/// Pure: no I/O, no shared mutable state. A structural failure returns
/// immediately; the integrity pass only ever sees a well-formed Blueprint.
#[derive(Debug, Clone, Copy)]
pub struct BlueprintValidator<'r> {
    registry: &'r SchemaRegistry,
    options: ValidatorOptions,
}

impl Default for BlueprintValidator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintValidator<'static> {
    /// Validator over the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(SchemaRegistry::global())
    }
}

impl<'r> BlueprintValidator<'r> {
    pub fn with_registry(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            options: ValidatorOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validate(&self, document: &Document) -> Result<Blueprint, ValidationReport> {
        let defaulted = self
            .structural()
            .validate_entity(Entity::Blueprint, document)
            .into_result()?;

        let blueprint: Blueprint = defaulted.deserialize_into().map_err(|e| {
            let error = DomainError::MaterializationFailed {
                entity: Entity::Blueprint.to_string(),
                reason: e.to_string(),
            };
            ValidationReport::new(vec![ValidationIssue::internal(error.to_string())])
        })?;

        ReferentialIntegrityChecker::new()
            .check(&blueprint)
            .map_err(ValidationReport::new)?;

        Ok(blueprint)
    }

    /// Structural validation only, for any registry entity. Returns the
    /// defaulted document.
    pub fn validate_contract(
        &self,
        entity: Entity,
        document: &Document,
    ) -> Result<Document, ValidationReport> {
        self.structural()
            .validate_entity(entity, document)
            .into_result()
    }

    fn structural(&self) -> StructuralValidator<'r> {
        StructuralValidator::new(self.registry).with_options(self.options)
    }
}

/// Validate a Blueprint document with default options.
pub fn validate_blueprint(document: &Document) -> Result<Blueprint, ValidationReport> {
    BlueprintValidator::new().validate(document)
}

/// Validate a platform contract document with default options.
pub fn validate_contract(entity: Entity, document: &Document) -> Result<Document, ValidationReport> {
    BlueprintValidator::new().validate_contract(entity, document)
}
