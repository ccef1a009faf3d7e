//! Application layer for Appkod.
//!
//! This layer contains:
//! - **Services**: use case orchestration (ValidationService, SchemaService)
//! - **Ports**: the `DocumentLoader` trait implemented by adapters
//! - **Errors**: loading and parsing failures
//!
//! Validation rules live in `crate::domain`; this layer only moves documents
//! to them and reports back.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BlueprintSummary, EntityDescription, EntityInfo, FieldInfo, SchemaService, ValidationService,
};

pub use ports::DocumentLoader;

pub use error::ApplicationError;
