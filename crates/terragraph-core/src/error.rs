//! Core error types.
//!
//! Uses `thiserror` for structured, matchable variants. Resolution failures
//! are recoverable by contract: a single failed path never aborts a scan,
//! and the vertex is left unchanged at that path.

use thiserror::Error;

/// Errors produced by the terragraph-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A deep-path update could not locate its target and no exact
    /// flattened key existed for the fallback assignment.
    #[error("unable to resolve attribute path '{path}' on vertex '{vertex}'")]
    AttributeResolution { path: String, vertex: String },
}
