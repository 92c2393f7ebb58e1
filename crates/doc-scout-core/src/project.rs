//! Project root detection and path normalization.

use std::path::{Component, Path, PathBuf};

const VCS_MARKER: &str = ".git";

/// Find the project root by walking up from `start` looking for a
/// version-control marker. Falls back to `start` itself when no ancestor
/// carries one.
pub fn find_project_root(start: &Path) -> PathBuf {
    let start = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());

    let mut current = start.as_path();
    loop {
        if current.join(VCS_MARKER).exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start,
        }
    }
}

/// Render a relative path with forward-slash separators regardless of
/// platform.
pub fn to_posix(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// Split a POSIX-style relative path into its segments.
pub fn path_components(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_root_with_git_marker() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested);
        assert_eq!(root, tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn falls_back_to_start_without_marker() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested);
        assert_eq!(root, nested.canonicalize().unwrap());
    }

    #[test]
    fn to_posix_joins_segments() {
        let p = Path::new("rules").join("coding");
        assert_eq!(to_posix(&p), "rules/coding");
    }

    #[test]
    fn path_components_splits() {
        assert_eq!(path_components("rules/coding"), vec!["rules", "coding"]);
        assert_eq!(path_components("docs"), vec!["docs"]);
    }
}
