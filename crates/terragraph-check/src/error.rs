//! Check-layer error types.
//!
//! All variants are caller contract violations surfaced eagerly when a
//! check document is compiled into operators — never during evaluation,
//! which is total and pure.

use thiserror::Error;

/// Errors produced when constructing predicate operators.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The operator name does not map to the supported set.
    #[error("unknown operator: '{name}'")]
    UnknownOperator { name: String },

    /// The comparison value does not fit the operator's semantics.
    #[error("invalid comparison value for operator '{operator}': {reason}")]
    InvalidComparison {
        operator: &'static str,
        reason: String,
    },
}
