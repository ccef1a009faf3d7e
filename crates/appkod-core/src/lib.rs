//! Appkod Core - Blueprint validation engine
//!
//! Domain and application layers for validating Appkod Blueprints (the
//! declarative app definitions the platform generates code from) and the
//! platform's tenant, user, and connector contracts.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            appkod-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │    (ValidationService, SchemaService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │             (DocumentLoader)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     appkod-adapters (Infrastructure)    │
//! │  (FileDocumentLoader, MemoryDocument…)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (SchemaRegistry, validators, Blueprint) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use appkod_core::domain::{Document, validate_blueprint};
//!
//! let document: Document = serde_json::from_str(r#"{ "name": "Empty" }"#).unwrap();
//! let report = validate_blueprint(&document).unwrap_err();
//!
//! assert!(report.has_issue_at("database"));
//! assert!(report.has_issue_at("ui"));
//! assert!(report.has_issue_at("api"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        BlueprintSummary, SchemaService, ValidationService, ports::DocumentLoader,
    };
    pub use crate::domain::{
        Blueprint, BlueprintValidator, Document, DocumentPath, Entity, EntityFamily, IssueKind,
        ValidationIssue, ValidationReport, ValidatorOptions, validate_blueprint, validate_contract,
    };
    pub use crate::error::{AppkodError, AppkodResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
