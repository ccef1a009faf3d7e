// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Appkod.
//!
//! Pure validation logic: no I/O, no logging, no global mutable state. Loading
//! documents from disk is an application/adapter concern.
//!
//! ## Layers, leaves first
//!
//! - **Vocabulary** ([`value_objects`]): closed enums of field and component kinds
//! - **Schema registry** ([`schema`]): one definition per entity, built once
//! - **Structural validator** ([`validator`]): check and default in one walk
//! - **Integrity checker** ([`integrity`]): cross-section name resolution
//! - **Facade** ([`facade`]): `validate_blueprint` / `validate_contract`

#[macro_use]
mod macros;

pub mod document;
pub mod entities;
pub mod error;
pub mod facade;
pub mod integrity;
pub mod path;
pub mod report;
pub mod schema;
pub mod validator;
pub mod value_objects;

pub use document::Document;
pub use entities::Blueprint;
pub use error::{DomainError, ErrorCategory};
pub use facade::{BlueprintValidator, validate_blueprint, validate_contract};
pub use integrity::ReferentialIntegrityChecker;
pub use path::{DocumentPath, PathSegment};
pub use report::{IssueKind, ValidationIssue, ValidationOutcome, ValidationReport};
pub use schema::{Definition, Entity, EntityFamily, SchemaRegistry};
pub use validator::{DEFAULT_MAX_DEPTH, StructuralValidator, ValidatorOptions};
pub use value_objects::{
    AuthProvider, ComponentCategory, ComponentType, DeployEnvironment, EndpointAuth, FieldType,
    HttpMethod, PageAuth, PageLayout, ReferentialAction, Region, StepAction, WorkflowTrigger,
};
