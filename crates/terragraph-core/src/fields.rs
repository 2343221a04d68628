//! Reserved keys in the exported attribute mapping.
//!
//! Base fields carry a trailing underscore so they cannot collide with
//! attribute keys from the source document; `self` is the one document key
//! that needs remapping (to [`SELF_REMAPPED`]) for the same reason.

/// Vertex name.
pub const BLOCK_NAME: &str = "block_name_";
/// Construct kind.
pub const BLOCK_TYPE: &str = "block_type_";
/// Normalized source path.
pub const FILE_PATH: &str = "file_path_";
/// Original declaration subtree.
pub const CONFIG: &str = "config_";
/// Human-oriented label, `"<kind>: <name>"`.
pub const LABEL: &str = "label_";
/// Caller-assigned identifier, possibly empty.
pub const ID: &str = "id_";
/// Source tag, possibly empty.
pub const SOURCE: &str = "source_";
/// Content fingerprint of the exported mapping.
pub const HASH: &str = "hash";
/// Sorted mutated-path list, present only while the fingerprint is computed.
pub const CHANGED_ATTRIBUTES: &str = "changed_attributes";
/// Export key for a document attribute literally named `self`.
pub const SELF_REMAPPED: &str = "self_";
/// Synthetic placeholder marking a resolved module; stripped at construction.
pub const RESOLVED_MODULE_KEY: &str = "__resolved__";
