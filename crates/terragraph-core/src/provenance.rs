//! Per-vertex provenance ledger.
//!
//! Every mutated attribute path is recorded together with the ordered chain
//! of originating-vertex identifiers responsible for it — the breadcrumbs an
//! analyst follows to see why an attribute holds its resolved value. Entries
//! keep mutation order; the fingerprint consumes a sorted view.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::VertexId;

/// Ordered chain of originating-vertex identifiers for one logical rewrite.
pub type Breadcrumbs = SmallVec<[VertexId; 4]>;

/// Appends `origin` to the chain unless it already terminates it.
///
/// One logical rewrite may touch several paths; this keeps a single
/// immediate cause from appearing twice in a row.
pub fn extend_breadcrumbs(chain: &mut Breadcrumbs, origin: VertexId) {
    if chain.last() != Some(&origin) {
        chain.push(origin);
    }
}

/// Record of which attribute paths have been mutated and by which chain of
/// origin vertices, in mutation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvenanceLedger {
    paths: IndexMap<String, Breadcrumbs>,
}

impl ProvenanceLedger {
    /// Records (or replaces) the chain for a path.
    pub fn record(&mut self, path: &str, chain: Breadcrumbs) {
        self.paths.insert(path.to_string(), chain);
    }

    /// Returns the chain recorded for a path.
    pub fn chain(&self, path: &str) -> Option<&[VertexId]> {
        self.paths.get(path).map(|chain| chain.as_slice())
    }

    /// Returns `true` if the path has been mutated.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Mutated paths in mutation order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Mutated paths sorted lexicographically, for fingerprinting.
    pub fn sorted_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.paths.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Breadcrumbs)> {
        self.paths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_appends_new_origin() {
        let mut chain = Breadcrumbs::new();
        extend_breadcrumbs(&mut chain, VertexId(1));
        extend_breadcrumbs(&mut chain, VertexId(2));
        assert_eq!(chain.as_slice(), &[VertexId(1), VertexId(2)]);
    }

    #[test]
    fn extend_skips_consecutive_duplicate() {
        let mut chain = Breadcrumbs::new();
        extend_breadcrumbs(&mut chain, VertexId(1));
        extend_breadcrumbs(&mut chain, VertexId(1));
        assert_eq!(chain.as_slice(), &[VertexId(1)]);

        // A non-consecutive repeat is a genuine hop and stays.
        extend_breadcrumbs(&mut chain, VertexId(2));
        extend_breadcrumbs(&mut chain, VertexId(1));
        assert_eq!(chain.as_slice(), &[VertexId(1), VertexId(2), VertexId(1)]);
    }

    #[test]
    fn ledger_keeps_mutation_order_and_sorts_on_demand() {
        let mut ledger = ProvenanceLedger::default();
        ledger.record("zone", Breadcrumbs::from_slice(&[VertexId(3)]));
        ledger.record("acl", Breadcrumbs::from_slice(&[VertexId(1)]));

        let in_order: Vec<&str> = ledger.paths().collect();
        assert_eq!(in_order, vec!["zone", "acl"]);
        assert_eq!(ledger.sorted_paths(), vec!["acl".to_string(), "zone".to_string()]);
    }

    #[test]
    fn record_replaces_existing_chain() {
        let mut ledger = ProvenanceLedger::default();
        ledger.record("acl", Breadcrumbs::from_slice(&[VertexId(1)]));
        ledger.record("acl", Breadcrumbs::from_slice(&[VertexId(1), VertexId(2)]));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.chain("acl"), Some(&[VertexId(1), VertexId(2)][..]));
    }
}
