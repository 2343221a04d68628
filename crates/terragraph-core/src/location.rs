//! Source location handling.
//!
//! A vertex's source path may encode the module instantiation it was reached
//! through as a `path[module_source#index]` suffix. The suffix is stripped at
//! construction and stored separately so the base path can be normalized and
//! compared across vertices.
//!
//! Normalization is lexical (`.` and `..` resolution only): the core owns no
//! I/O, so symlink resolution belongs to the document parser if it is needed.

use std::path::{Component, Path, PathBuf};

/// Splits a `path[module_source#index]` location into its parts.
///
/// Returns `(path, module_source, index)`. Locations without a module
/// context come back with empty `module_source` and `index`.
pub fn strip_module_context(path: &str) -> (String, String, String) {
    if let Some(start) = path.find('[') {
        if path.ends_with(']') {
            let base = path[..start].to_string();
            let inner = &path[start + 1..path.len() - 1];
            return match inner.rsplit_once('#') {
                Some((source, index)) => (base, source.to_string(), index.to_string()),
                None => (base, inner.to_string(), String::new()),
            };
        }
    }
    (path.to_string(), String::new(), String::new())
}

/// Lexically normalizes a path, resolving `.` and `..` components.
///
/// `..` above the root of an absolute path is dropped; on a relative path it
/// is kept when there is nothing left to pop.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return ".".to_string();
    }
    let mut out = PathBuf::new();
    for component in parts {
        out.push(component.as_os_str());
    }
    out.to_string_lossy().into_owned()
}
