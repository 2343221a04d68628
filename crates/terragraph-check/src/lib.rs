//! Declarative predicate layer for policy checks.
//!
//! Policy checks question resolved attribute values through named operators
//! without needing to know whether a value came from source text or was
//! synthesized during resolution. A check compiler builds
//! [`AttributePredicate`]s from check documents — operator names resolve to
//! the closed [`OperatorKind`] set and comparison values are validated when
//! the document loads — and evaluates them against vertices' exported
//! attribute mappings.

pub mod error;
pub mod operators;

pub use error::CheckError;
pub use operators::{AttributePredicate, OperatorKind};
