//! Construct kinds.
//!
//! The declared role of a vertex in the source document. The kind drives
//! cross-kind attribute lookup (variables resolve through `default`, outputs
//! through `value`, resources through their own name) and predicate
//! applicability filtering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared role of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Resource,
    Data,
    Module,
    Variable,
    Output,
    Provider,
    Locals,
    Terraform,
}

impl BlockKind {
    /// Returns the lowercase name used in exported mappings and check
    /// documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Resource => "resource",
            BlockKind::Data => "data",
            BlockKind::Module => "module",
            BlockKind::Variable => "variable",
            BlockKind::Output => "output",
            BlockKind::Provider => "provider",
            BlockKind::Locals => "locals",
            BlockKind::Terraform => "terraform",
        }
    }

    /// Parses a lowercase kind name. Unknown names return `None`.
    pub fn parse(name: &str) -> Option<BlockKind> {
        match name {
            "resource" => Some(BlockKind::Resource),
            "data" => Some(BlockKind::Data),
            "module" => Some(BlockKind::Module),
            "variable" => Some(BlockKind::Variable),
            "output" => Some(BlockKind::Output),
            "provider" => Some(BlockKind::Provider),
            "locals" => Some(BlockKind::Locals),
            "terraform" => Some(BlockKind::Terraform),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
