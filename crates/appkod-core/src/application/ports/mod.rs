//! Application ports (traits) for external dependencies.
//!
//! - **Driven (Output) Ports**: called by the application, implemented by
//!   infrastructure
//!   - `DocumentLoader`: reading and parsing Blueprint/contract documents

pub mod output;

pub use output::DocumentLoader;

#[cfg(test)]
pub use output::MockDocumentLoader;
