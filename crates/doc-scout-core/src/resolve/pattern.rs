//! Path pattern matching and exclusion checks.
//!
//! Patterns are relative paths with at most one `*` segment. Matching is
//! segment-positional: every literal pattern segment must equal the path
//! segment at the same position, and the path may have extra trailing
//! segments (typically a file name). Exclusion is segment-exact.

/// Normalize separators to forward slashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Does `path` fall under `pattern`?
pub fn path_matches_pattern(path: &str, pattern: &str) -> bool {
    let pattern_parts: Vec<&str> = pattern.trim_end_matches('/').split('/').collect();
    let normalized = normalize_path(path);
    let path_parts: Vec<&str> = normalized.split('/').collect();

    if path_parts.len() < pattern_parts.len() {
        return false;
    }

    pattern_parts
        .iter()
        .enumerate()
        .all(|(i, part)| *part == "*" || path_parts[i] == *part)
}

/// Is any path segment exactly one of the exclude names?
pub fn is_excluded(path: &str, excludes: &[String]) -> bool {
    if excludes.is_empty() {
        return false;
    }
    normalize_path(path)
        .split('/')
        .any(|segment| excludes.iter().any(|name| name == segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excludes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn literal_match() {
        assert!(path_matches_pattern("rules/coding.md", "rules"));
        assert!(path_matches_pattern(
            "specs/requirements/req.md",
            "specs/requirements"
        ));
    }

    #[test]
    fn wildcard_matches_one_segment() {
        assert!(path_matches_pattern(
            "specs/login/requirements/req.md",
            "specs/*/requirements"
        ));
        assert!(!path_matches_pattern(
            "specs/login/design/d.md",
            "specs/*/requirements"
        ));
    }

    #[test]
    fn shorter_path_never_matches() {
        assert!(!path_matches_pattern("specs/login", "specs/*/requirements"));
    }

    #[test]
    fn trailing_slash_on_pattern_ignored() {
        assert!(path_matches_pattern(
            "specs/login/requirements/req.md",
            "specs/*/requirements/"
        ));
    }

    #[test]
    fn excluded_segment() {
        let ex = excludes(&["archived", "_template"]);
        assert!(is_excluded("specs/archived/requirements/req.md", &ex));
        assert!(is_excluded("specs/_template/requirements/req.md", &ex));
        assert!(!is_excluded("specs/login/requirements/req.md", &ex));
    }

    #[test]
    fn exclusion_is_segment_exact() {
        let ex = excludes(&["archived"]);
        assert!(!is_excluded("specs/archived_v2/requirements/req.md", &ex));
        assert!(is_excluded("a/b/c/archived/d/e.md", &ex));
    }

    #[test]
    fn empty_exclude_list_never_excludes() {
        assert!(!is_excluded("specs/archived/req.md", &[]));
    }

    #[test]
    fn backslash_separators_normalized() {
        let ex = excludes(&["archived"]);
        assert!(is_excluded("specs\\archived\\requirements\\req.md", &ex));
        assert!(path_matches_pattern(
            "specs\\login\\requirements\\req.md",
            "specs/*/requirements"
        ));
    }
}
