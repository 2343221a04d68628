//! Dotted attribute path helpers.
//!
//! The path syntax is shared by deep-path mutation, the flattened export
//! keys, and predicate operator attribute paths, and must parse identically
//! in all three: `.` separates components, numeric components denote
//! sequence indices, everything else keys into a mapping.

/// Splits a path into its first component and the remainder, if any.
pub fn split_first(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((first, rest)) => (first, Some(rest)),
        None => (path, None),
    }
}

/// Parses a path component as a sequence index.
pub fn parse_index(component: &str) -> Option<usize> {
    component.parse::<usize>().ok()
}

/// Joins the leading components of a path, trimming `trim` components off
/// the end.
pub fn join_prefix(components: &[&str], trim: usize) -> String {
    components[..components.len() - trim].join(".")
}
