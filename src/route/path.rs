//! Route path concatenation utilities

/// Separator between route path segments
pub const PATH_SEPARATOR: char = '/';

/// Append `segment` to `base`, inserting exactly one separator between them.
///
/// A separator is only added when `base` does not already end with one, so
/// `"/foo/"` and `"/foo"` both resolve to `"/foo/bar"` for segment `"bar"`.
/// The segment itself is appended verbatim.
pub fn join_segment(base: &str, segment: &str) -> String {
    let mut joined = String::with_capacity(base.len() + segment.len() + 1);
    joined.push_str(base);
    if !base.ends_with(PATH_SEPARATOR) {
        joined.push(PATH_SEPARATOR);
    }
    joined.push_str(segment);
    joined
}
