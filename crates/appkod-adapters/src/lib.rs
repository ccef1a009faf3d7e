//! Infrastructure adapters for Appkod.
//!
//! This crate implements the ports defined in `appkod_core::application::ports`.
//! All file I/O and YAML/JSON parsing lives here.

pub mod builtin_blueprints;
pub mod loader;

pub use builtin_blueprints::StarterBlueprint;
pub use loader::{
    DocumentFormat, FileDocumentLoader, MemoryDocumentLoader, PARSABLE_COMPONENT_NESTING,
};
