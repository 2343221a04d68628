//! Stable vertex identifier.
//!
//! A distinct newtype over `u32` so a vertex identity cannot be confused
//! with an ordinary integer attribute. The surrounding graph builder assigns
//! these; the core only records them in provenance chains, module
//! connections, and source-module sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a vertex within the surrounding graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VertexId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_inner_value() {
        assert_eq!(format!("{}", VertexId(7)), "7");
    }

    #[test]
    fn serde_roundtrip() {
        let id = VertexId(42);
        let json = serde_json::to_string(&id).unwrap();
        let back: VertexId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn ids_order_by_inner_value() {
        let mut ids = vec![VertexId(3), VertexId(1), VertexId(2)];
        ids.sort();
        assert_eq!(ids, vec![VertexId(1), VertexId(2), VertexId(3)]);
    }
}
