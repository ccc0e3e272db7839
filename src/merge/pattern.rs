//! Dot-path pattern matching
//!
//! Paths and patterns are dot-separated key lists such as `service.ports`.
//! In a pattern, a `*` segment matches exactly one path segment. A pattern
//! only matches paths with the same number of segments: `a.*` matches `a.b`
//! but neither `a` nor `a.b.c`.

/// Check whether `path` matches `pattern`.
///
/// # Examples
///
/// ```
/// use pack_combiner::merge::matches_pattern;
///
/// assert!(matches_pattern("checks.lint.level", "checks.*.level"));
/// assert!(!matches_pattern("checks.lint", "checks.*.level"));
/// ```
pub fn matches_pattern(path: &str, pattern: &str) -> bool {
    let path_segments: Vec<&str> = path.split('.').collect();
    let pattern_segments: Vec<&str> = pattern.split('.').collect();

    path_segments.len() == pattern_segments.len()
        && path_segments
            .iter()
            .zip(&pattern_segments)
            .all(|(segment, expected)| *expected == "*" || segment == expected)
}

/// Check whether `path` matches any of `patterns`.
pub fn matches_any(path: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| matches_pattern(path, pattern))
}
