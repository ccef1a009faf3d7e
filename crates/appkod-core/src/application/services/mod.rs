//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports: "validate this file",
//! "describe this entity".

pub mod schema_service;
pub mod validation_service;

pub use schema_service::{EntityDescription, EntityInfo, FieldInfo, SchemaService};
pub use validation_service::{BlueprintSummary, ValidationService};
