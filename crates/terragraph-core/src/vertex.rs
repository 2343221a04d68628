//! Vertex: one declared construct and its resolved attributes.
//!
//! A vertex owns the nested attribute tree parsed from its declaration plus
//! a flattened dotted-path projection of it, kept in one insertion-ordered
//! mapping. Reference resolution rewrites attributes through
//! [`Vertex::update_attribute`], which keeps both views synchronized and
//! records provenance in the vertex's [`ProvenanceLedger`]. Policy checks
//! read the vertex exclusively through [`Vertex::export`].
//!
//! All state is private; mutations go through methods, and exported
//! mappings are fresh copies the caller may retain or mutate freely.
//!
//! Operations on a single vertex are synchronous and not safe for
//! concurrent mutation — callers serialize writes per vertex. Distinct
//! vertices are fully independent.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::encode::{decode_value, encode_value};
use crate::error::CoreError;
use crate::fields;
use crate::flatten::{flatten_attribute, flatten_into};
use crate::hash::fingerprint;
use crate::id::VertexId;
use crate::kind::BlockKind;
use crate::location::{normalize_path, strip_module_context};
use crate::path::{join_prefix, parse_index, split_first};
use crate::provenance::{extend_breadcrumbs, Breadcrumbs, ProvenanceLedger};
use crate::value::AttrValue;

/// In-memory representation of one declared infrastructure construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique name within the construct kind, e.g. `"aws_vpc.example"`.
    pub name: String,
    /// Caller-assigned identifier, possibly empty.
    pub id: String,
    /// The declared role of this construct.
    pub kind: BlockKind,
    /// Normalized source path, module-context suffix stripped.
    pub path: String,
    /// Module source this vertex was instantiated through, if any.
    pub module_dependency: String,
    /// Instantiation index within the module source, if any.
    pub module_dependency_num: String,
    /// Source tag, possibly empty.
    pub source: String,
    /// The declaration subtree as parsed, owned exclusively by this vertex.
    config: AttrValue,
    /// Nested attribute values plus their flattened dotted-path projection.
    attributes: IndexMap<String, AttrValue>,
    /// Provenance for every mutated path, in mutation order.
    changed_attributes: ProvenanceLedger,
    /// Module-boundary cross-references discovered per attribute path.
    module_connections: IndexMap<String, Vec<VertexId>>,
    /// Module vertices this vertex was instantiated through.
    source_module: BTreeSet<VertexId>,
    /// Encode every exported value as canonical JSON text.
    encode: bool,
}

impl Vertex {
    /// Builds a vertex from a parsed declaration.
    ///
    /// Takes ownership of `config` and `attributes` — the caller's document
    /// can no longer alias into the vertex. The reserved resolved-module
    /// placeholder key is stripped, and every top-level attribute declared
    /// as a non-empty sequence of mappings (the repeated-block form) is
    /// flattened into the dotted-path projection immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        config: AttrValue,
        path: &str,
        kind: BlockKind,
        mut attributes: IndexMap<String, AttrValue>,
        id: impl Into<String>,
        source: impl Into<String>,
        encode: bool,
    ) -> Self {
        let (file_path, module_dependency, module_dependency_num) = if path.is_empty() {
            (String::new(), String::new(), String::new())
        } else {
            let (stripped, dependency, num) = strip_module_context(path);
            (normalize_path(&stripped), dependency, num)
        };

        attributes.shift_remove(fields::RESOLVED_MODULE_KEY);

        let mut vertex = Vertex {
            name: name.into(),
            id: id.into(),
            kind,
            path: file_path,
            module_dependency,
            module_dependency_num,
            source: source.into(),
            config,
            attributes,
            changed_attributes: ProvenanceLedger::default(),
            module_connections: IndexMap::new(),
            source_module: BTreeSet::new(),
            encode,
        };
        vertex.extract_inner_attributes();
        vertex
    }

    /// Merges the flattened projection of every repeated-block attribute
    /// into the attribute mapping.
    fn extract_inner_attributes(&mut self) {
        let mut extracted = IndexMap::new();
        for (key, value) in &self.attributes {
            if let AttrValue::Seq(items) = value {
                if !items.is_empty() && matches!(items[0], AttrValue::Map(_)) {
                    extracted.extend(flatten_attribute(key, value));
                }
            }
        }
        self.attributes.extend(extracted);
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// The nested attributes and their flattened projection, as one mapping.
    pub fn attributes(&self) -> &IndexMap<String, AttrValue> {
        &self.attributes
    }

    /// Looks up one attribute by exact key or dotted path.
    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// The declaration subtree as parsed.
    pub fn config(&self) -> &AttrValue {
        &self.config
    }

    /// Provenance ledger of every mutated attribute path.
    pub fn changed_attributes(&self) -> &ProvenanceLedger {
        &self.changed_attributes
    }

    /// Module-boundary cross-references per attribute path.
    pub fn module_connections(&self) -> &IndexMap<String, Vec<VertexId>> {
        &self.module_connections
    }

    /// Module vertices this vertex was instantiated through.
    pub fn source_modules(&self) -> &BTreeSet<VertexId> {
        &self.source_module
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Records that this vertex was instantiated through `module_id`.
    pub fn add_source_module(&mut self, module_id: VertexId) {
        self.source_module.insert(module_id);
    }

    /// Records a module-boundary cross-reference for an attribute path.
    pub fn add_module_connection(&mut self, attribute_path: &str, vertex_id: VertexId) {
        self.module_connections
            .entry(attribute_path.to_string())
            .or_default()
            .push(vertex_id);
    }

    /// Rewrites the attribute at `attribute_path` with `value`.
    ///
    /// `breadcrumbs` is the caller's provenance chain for the logical
    /// rewrite this call belongs to; `origin` is appended unless it already
    /// terminates the chain, and the chain stays observable to the caller
    /// after the call, success or failure.
    ///
    /// On success the nested tree is rewritten in place, and the full path
    /// plus every dotted strict prefix is written into the flattened
    /// projection (the value re-wrapped one singleton mapping per peeled
    /// segment) and recorded in the ledger. On a traversal failure the
    /// value is assigned directly iff the exact full path already exists as
    /// a flattened key; otherwise the vertex is left unchanged and a
    /// recoverable error is returned.
    pub fn update_attribute(
        &mut self,
        attribute_path: &str,
        value: AttrValue,
        origin: VertexId,
        breadcrumbs: &mut Breadcrumbs,
    ) -> Result<(), CoreError> {
        extend_breadcrumbs(breadcrumbs, origin);

        self.update_nested(attribute_path, &value)?;

        let components: Vec<&str> = attribute_path.split('.').collect();
        if components.len() == 1 {
            self.changed_attributes
                .record(attribute_path, breadcrumbs.clone());
            return Ok(());
        }

        let mut wrapped = value;
        for trim in 0..components.len() - 1 {
            let kept = &components[..components.len() - trim];
            let prefix = join_prefix(&components, trim);
            self.attributes.insert(prefix.clone(), wrapped.clone());
            self.changed_attributes.record(&prefix, breadcrumbs.clone());
            wrapped = AttrValue::Map(IndexMap::from([(
                kept[kept.len() - 1].to_string(),
                wrapped,
            )]));
        }
        Ok(())
    }

    /// Applies the nested rewrite, falling back to a direct full-path
    /// assignment when traversal fails and the exact path exists as a key.
    fn update_nested(&mut self, attribute_path: &str, value: &AttrValue) -> Result<(), CoreError> {
        let (first, rest) = split_first(attribute_path);
        match rest {
            None => {
                self.attributes.insert(first.to_string(), value.clone());
                Ok(())
            }
            Some(rest) => {
                if let Some(child) = self.attributes.get_mut(first) {
                    // Check before mutating: a broadcast either rewrites
                    // every element or nothing.
                    if path_applies(child, rest) {
                        apply_at_path(child, rest, value);
                        return Ok(());
                    }
                }
                if self.attributes.contains_key(attribute_path) {
                    self.attributes
                        .insert(attribute_path.to_string(), value.clone());
                    return Ok(());
                }
                warn!(
                    path = attribute_path,
                    vertex = %self.name,
                    "unable to resolve attribute path for update"
                );
                Err(CoreError::AttributeResolution {
                    path: attribute_path.to_string(),
                    vertex: self.name.clone(),
                })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Searches for an attribute that may live under different keys
    /// depending on the construct kind.
    ///
    /// The first candidate component wins when it exists as a top-level
    /// key. Variables fall back to `default`, outputs to `value`, and a
    /// resource matches `["<own name>", "<attribute>"]` self-references.
    /// Absence is a normal outcome: the caller treats it as an unresolved
    /// reference.
    pub fn find_attribute<'a>(&self, candidate: &'a [String]) -> Option<&'a str> {
        let first = candidate.first()?;
        if self.attributes.contains_key(first.as_str()) {
            return Some(first.as_str());
        }

        match self.kind {
            BlockKind::Variable if self.attributes.contains_key("default") => Some("default"),
            BlockKind::Output if self.attributes.contains_key("value") => Some("value"),
            BlockKind::Resource if candidate.len() > 1 => {
                if self.name == *first && self.attributes.contains_key(candidate[1].as_str()) {
                    Some(candidate[1].as_str())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Exports the flattened attribute mapping for query and policy-check
    /// consumption.
    ///
    /// Base identity fields merge with the flattened form of every
    /// attribute; a key literally named `self` is remapped to `self_`. The
    /// content fingerprint is computed over the mapping (with the sorted
    /// mutated-path list mixed in when the ledger is non-empty, and after
    /// encoding when enabled) and exported under `hash`. The returned
    /// mapping is a fresh copy.
    pub fn export(&self) -> IndexMap<String, AttrValue> {
        self.export_with_digest().0
    }

    /// Exports with every value decoded back to its original shape.
    ///
    /// Only meaningful when encoding is enabled; values that do not parse
    /// (the digest itself) stay unchanged.
    pub fn export_decoded(&self) -> IndexMap<String, AttrValue> {
        let mut exported = self.export();
        if self.encode {
            for value in exported.values_mut() {
                *value = decode_value(value);
            }
        }
        exported
    }

    /// The content fingerprint of the exported mapping.
    pub fn content_hash(&self) -> String {
        self.export_with_digest().1
    }

    fn export_with_digest(&self) -> (IndexMap<String, AttrValue>, String) {
        let mut exported = self.base_attributes();
        self.merge_origin_attributes(&mut exported);

        if !self.changed_attributes.is_empty() {
            let paths = self
                .changed_attributes
                .sorted_paths()
                .into_iter()
                .map(AttrValue::String)
                .collect();
            exported.insert(fields::CHANGED_ATTRIBUTES.to_string(), AttrValue::Seq(paths));
        }

        if self.encode {
            for value in exported.values_mut() {
                *value = encode_value(value);
            }
        }

        let digest = fingerprint(&exported);
        exported.insert(fields::HASH.to_string(), AttrValue::String(digest.clone()));
        // The mutated-path list exists only for the digest.
        exported.shift_remove(fields::CHANGED_ATTRIBUTES);

        (exported, digest)
    }

    fn base_attributes(&self) -> IndexMap<String, AttrValue> {
        IndexMap::from([
            (
                fields::BLOCK_NAME.to_string(),
                AttrValue::String(self.name.clone()),
            ),
            (
                fields::BLOCK_TYPE.to_string(),
                AttrValue::String(self.kind.as_str().to_string()),
            ),
            (
                fields::FILE_PATH.to_string(),
                AttrValue::String(self.path.clone()),
            ),
            (fields::CONFIG.to_string(), self.config.clone()),
            (fields::LABEL.to_string(), AttrValue::String(self.to_string())),
            (fields::ID.to_string(), AttrValue::String(self.id.clone())),
            (
                fields::SOURCE.to_string(),
                AttrValue::String(self.source.clone()),
            ),
        ])
    }

    fn merge_origin_attributes(&self, exported: &mut IndexMap<String, AttrValue>) {
        for (key, value) in &self.attributes {
            let mut flat = IndexMap::new();
            let rebuilt = flatten_into(key, value, &mut flat);
            if key == "self" {
                flat.shift_remove("self");
                flat.insert(fields::SELF_REMAPPED.to_string(), rebuilt);
            }
            exported.extend(flat);
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.name)
    }
}

/// Read-only check that a rewrite at `path` can descend through `node`.
///
/// Mirrors the mutating traversal exactly so the pair stays atomic: numeric
/// components index sequences, other components key mappings, and a
/// non-numeric component over a sequence must apply to every element. A
/// mapping accepts any final component (assignment inserts); primitives
/// accept nothing.
fn path_applies(node: &AttrValue, path: &str) -> bool {
    let (first, rest) = split_first(path);
    match node {
        AttrValue::Seq(items) => match parse_index(first) {
            Some(index) => match rest {
                None => index < items.len(),
                Some(rest) => items
                    .get(index)
                    .map_or(false, |child| path_applies(child, rest)),
            },
            None => items.iter().all(|item| path_applies(item, path)),
        },
        AttrValue::Map(entries) => match rest {
            None => true,
            Some(rest) => entries
                .get(first)
                .map_or(false, |child| path_applies(child, rest)),
        },
        _ => false,
    }
}

/// Rewrites `node` at `path`. Callers verify with [`path_applies`] first.
fn apply_at_path(node: &mut AttrValue, path: &str, value: &AttrValue) {
    let (first, rest) = split_first(path);
    match node {
        AttrValue::Seq(items) => match parse_index(first) {
            Some(index) => {
                if let Some(child) = items.get_mut(index) {
                    match rest {
                        None => *child = value.clone(),
                        Some(rest) => apply_at_path(child, rest, value),
                    }
                }
            }
            None => {
                for item in items.iter_mut() {
                    apply_at_path(item, path, value);
                }
            }
        },
        AttrValue::Map(entries) => match rest {
            None => {
                entries.insert(first.to_string(), value.clone());
            }
            Some(rest) => {
                if let Some(child) = entries.get_mut(first) {
                    apply_at_path(child, rest, value);
                }
            }
        },
        _ => {}
    }
}
