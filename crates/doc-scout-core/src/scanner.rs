//! Markdown directory scanner.
//!
//! Walks a project tree and reports directories that directly contain
//! Markdown files, together with the metadata downstream classification
//! needs. The walk is shallow: a directory that reports Markdown files
//! claims its whole subtree, and none of its descendants are visited.
//! Symlinks are followed, with the canonical real path of every visited
//! directory tracked so cycles terminate.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::frontmatter::extract_front_matter;
use crate::project::{path_components, to_posix};

/// Directory names never scanned or reported (exact name match).
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    ".claude",
    ".github",
    ".vscode",
    ".idea",
    "node_modules",
    "__pycache__",
    ".tox",
    ".mypy_cache",
    "venv",
    ".venv",
    "env",
    ".env",
    "dist",
    "build",
    "target",
    "out",
    ".next",
    ".nuxt",
    ".svelte-kit",
    "vendor",
    "Pods",
    ".gradle",
];

/// Files that mark a directory as source code rather than documentation.
/// Such a directory is never reported, but its children are still scanned.
pub const SKIP_INDICATORS: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "setup.py",
    "pyproject.toml",
];

/// Markdown file names (lowercase) that do not count as documentation
/// content on their own.
const README_ONLY_NAMES: &[&str] = &[
    "readme.md",
    "changelog.md",
    "contributing.md",
    "license.md",
    "code_of_conduct.md",
    "security.md",
];

/// A directory discovered by the scanner.
#[derive(Debug, Clone)]
pub struct CandidateDirectory {
    /// Relative path, POSIX-style segments
    pub path: String,
    /// Markdown files directly inside (not recursive)
    pub md_count: usize,
    /// True when every Markdown file is a README/CHANGELOG-type file
    pub readme_only: bool,
}

/// A candidate directory enriched with scan metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedDirectory {
    pub dir: String,
    pub md_count: usize,
    pub readme_only: bool,
    pub path_components: Vec<String>,
    /// Raw `doc_type` values declared in front matter, in file-name order,
    /// duplicates retained. `None` when no file declares one.
    pub frontmatter_doc_types: Option<Vec<String>>,
}

/// The scan JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub project_root: String,
    pub directories: Vec<ScannedDirectory>,
}

/// Markdown directory scanner for one project root.
pub struct Scanner {
    root: PathBuf,
    skip_dirs: HashSet<String>,
}

impl Scanner {
    /// Scanner with the built-in skip set.
    pub fn new(root: &Path) -> Self {
        Self::with_config(root, &ScanConfig::default())
    }

    /// Scanner with the built-in skip set adjusted by configuration:
    /// `exclude` adds names, `include` removes built-in names.
    pub fn with_config(root: &Path, config: &ScanConfig) -> Self {
        let mut skip_dirs: HashSet<String> =
            SKIP_DIRS.iter().map(|s| s.to_string()).collect();
        for dir in &config.exclude {
            skip_dirs.insert(dir.clone());
        }
        for dir in &config.include {
            skip_dirs.remove(dir);
        }
        Self {
            root: root.to_path_buf(),
            skip_dirs,
        }
    }

    /// Find directories directly containing Markdown files.
    ///
    /// Unreadable directories are skipped silently. Entries are visited in
    /// file-name order, so results are stable across platforms.
    pub fn find_md_dirs(&self) -> Vec<CandidateDirectory> {
        let mut results = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();
        if let Ok(canon) = self.root.canonicalize() {
            seen.insert(canon);
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name();
        let mut it = walker.into_iter();

        while let Some(entry) = it.next() {
            let entry = match entry {
                Ok(e) => e,
                // Unreadable nodes and walkdir's own ancestor-loop errors
                Err(_) => continue,
            };
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.skip_dirs.contains(name.as_ref()) || name.starts_with('.') {
                it.skip_current_dir();
                continue;
            }

            // Cycle safety: one visit per canonical real path
            let canon = match entry.path().canonicalize() {
                Ok(c) => c,
                Err(_) => {
                    it.skip_current_dir();
                    continue;
                }
            };
            if !seen.insert(canon) {
                it.skip_current_dir();
                continue;
            }

            // Source-code directory: descend, never report
            if SKIP_INDICATORS
                .iter()
                .any(|ind| entry.path().join(ind).exists())
            {
                continue;
            }

            let md_files = match list_md_files(entry.path()) {
                Ok(files) => files,
                Err(_) => continue,
            };
            if md_files.is_empty() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .map(to_posix)
                .unwrap_or_else(|_| entry.path().display().to_string());
            results.push(CandidateDirectory {
                path: rel,
                md_count: md_files.len(),
                readme_only: is_readme_only(&md_files),
            });

            // Shallow stop: this directory claims its subtree
            it.skip_current_dir();
        }

        results
    }

    /// Candidates filtered by top-level skip prefixes.
    pub fn candidates(&self, skip_prefixes: &[String]) -> Vec<CandidateDirectory> {
        let prefixes: Vec<&str> = skip_prefixes
            .iter()
            .map(|p| p.trim().trim_end_matches('/'))
            .filter(|p| !p.is_empty())
            .collect();

        self.find_md_dirs()
            .into_iter()
            .filter(|c| !matches_skip_prefix(&c.path, &prefixes))
            .collect()
    }

    /// Full scan: candidates filtered by top-level skip prefixes, enriched
    /// with path components and front-matter doc types.
    pub fn scan(&self, skip_prefixes: &[String]) -> Vec<ScannedDirectory> {
        self.candidates(skip_prefixes)
            .into_iter()
            .map(|c| {
                let doc_types = self.collect_frontmatter_doc_types(&c.path);
                ScannedDirectory {
                    path_components: path_components(&c.path),
                    frontmatter_doc_types: doc_types,
                    dir: c.path,
                    md_count: c.md_count,
                    readme_only: c.readme_only,
                }
            })
            .collect()
    }

    /// Scan and wrap into the scan JSON object.
    pub fn report(&self, skip_prefixes: &[String]) -> ScanReport {
        ScanReport {
            project_root: self.root.display().to_string(),
            directories: self.scan(skip_prefixes),
        }
    }

    /// Declared `doc_type` values of a directory's Markdown files.
    fn collect_frontmatter_doc_types(&self, dir: &str) -> Option<Vec<String>> {
        let full = self.root.join(dir);
        let mut names = match list_md_files(&full) {
            Ok(files) => files,
            Err(_) => return None,
        };
        names.sort();

        let doc_types: Vec<String> = names
            .iter()
            .filter_map(|name| extract_front_matter(&full.join(name)))
            .filter_map(|fm| fm.get("doc_type").cloned())
            .collect();

        if doc_types.is_empty() {
            None
        } else {
            Some(doc_types)
        }
    }
}

fn matches_skip_prefix(dir: &str, prefixes: &[&str]) -> bool {
    prefixes
        .iter()
        .any(|p| dir == *p || dir.starts_with(&format!("{}/", p)))
}

fn is_readme_only(md_files: &[String]) -> bool {
    md_files
        .iter()
        .all(|name| README_ONLY_NAMES.contains(&name.to_lowercase().as_str()))
}

/// File names ending in `.md` directly inside `dir`.
pub(crate) fn list_md_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".md") && entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            files.push(name);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn dirs_of(candidates: &[CandidateDirectory]) -> Vec<&str> {
        candidates.iter().map(|c| c.path.as_str()).collect()
    }

    #[test]
    fn finds_md_dirs() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        write_file(tmp.path(), "specs/req.md", "# Req");

        let result = Scanner::new(tmp.path()).find_md_dirs();
        let dirs = dirs_of(&result);
        assert!(dirs.contains(&"docs"));
        assert!(dirs.contains(&"specs"));
    }

    #[test]
    fn skip_dirs_excluded() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), ".git/info.md", "internal");
        write_file(tmp.path(), "node_modules/pkg/README.md", "pkg");
        write_file(tmp.path(), "docs/guide.md", "# Guide");

        let result = Scanner::new(tmp.path()).find_md_dirs();
        let dirs = dirs_of(&result);
        assert!(!dirs.contains(&".git"));
        assert!(!dirs.contains(&"node_modules/pkg"));
        assert!(dirs.contains(&"docs"));
    }

    #[test]
    fn project_indicator_dir_not_reported_but_descended() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "frontend/package.json", "{}");
        write_file(tmp.path(), "frontend/README.md", "# Frontend");
        write_file(tmp.path(), "frontend/docs/guide.md", "# Guide");

        let result = Scanner::new(tmp.path()).find_md_dirs();
        let dirs = dirs_of(&result);
        assert!(!dirs.contains(&"frontend"));
        assert!(dirs.contains(&"frontend/docs"));
    }

    #[test]
    fn root_itself_not_reported() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "README.md", "# Root");

        let result = Scanner::new(tmp.path()).find_md_dirs();
        assert!(result.is_empty());
    }

    #[test]
    fn md_count_not_recursive() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "# A");
        write_file(tmp.path(), "docs/b.md", "# B");
        write_file(tmp.path(), "docs/c.md", "# C");

        let result = Scanner::new(tmp.path()).find_md_dirs();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].md_count, 3);
    }

    #[test]
    fn shallow_stop_claims_subtree() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "specs/overview.md", "# Overview");
        write_file(tmp.path(), "specs/login/requirements/req.md", "# Req");

        let result = Scanner::new(tmp.path()).find_md_dirs();
        let dirs = dirs_of(&result);
        assert!(dirs.contains(&"specs"));
        assert!(!dirs.contains(&"specs/login/requirements"));
    }

    #[test]
    fn shallow_stop_siblings_independent() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "rules/coding/style.md", "# Style");
        write_file(tmp.path(), "rules/naming/names.md", "# Names");

        let result = Scanner::new(tmp.path()).find_md_dirs();
        let dirs = dirs_of(&result);
        assert!(dirs.contains(&"rules/coding"));
        assert!(dirs.contains(&"rules/naming"));
        assert!(!dirs.contains(&"rules"));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_self_loop_terminates() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tree/docs/guide.md", "# Guide");
        // tree/ has no Markdown itself, so the walker descends into the loop
        std::os::unix::fs::symlink(tmp.path().join("tree"), tmp.path().join("tree/self"))
            .unwrap();

        let result = Scanner::new(tmp.path()).find_md_dirs();
        let count = result.iter().filter(|c| c.path == "tree/docs").count();
        assert_eq!(count, 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_parent_terminates() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tree/docs/guide.md", "# Guide");
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("tree/up")).unwrap();

        let result = Scanner::new(tmp.path()).find_md_dirs();
        let count = result.iter().filter(|c| c.path == "tree/docs").count();
        assert_eq!(count, 1);
    }

    #[cfg(unix)]
    #[test]
    fn sibling_symlinks_to_same_dir_reported_once() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        // "alias" sorts before "docs"; whichever is visited first wins
        std::os::unix::fs::symlink(tmp.path().join("docs"), tmp.path().join("alias")).unwrap();

        let result = Scanner::new(tmp.path()).find_md_dirs();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn config_extends_and_shrinks_skip_set() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "generated/api.md", "# Api");
        write_file(tmp.path(), "vendor/notes.md", "# Notes");

        let config = ScanConfig {
            exclude: vec!["generated".to_string()],
            include: vec!["vendor".to_string()],
        };
        let result = Scanner::with_config(tmp.path(), &config).find_md_dirs();
        let dirs = dirs_of(&result);
        assert!(!dirs.contains(&"generated"));
        assert!(dirs.contains(&"vendor"));
    }

    #[test]
    fn scan_collects_metadata() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");

        let result = Scanner::new(tmp.path()).scan(&[]);
        assert_eq!(result.len(), 1);
        let entry = &result[0];
        assert_eq!(entry.dir, "docs");
        assert_eq!(entry.md_count, 1);
        assert!(!entry.readme_only);
        assert_eq!(entry.path_components, vec!["docs"]);
        assert!(entry.frontmatter_doc_types.is_none());
    }

    #[test]
    fn scan_flags_readme_only() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/README.md", "# Readme");
        write_file(tmp.path(), "docs/CHANGELOG.md", "# Changes");
        write_file(tmp.path(), "specs/req.md", "# Req");

        let result = Scanner::new(tmp.path()).scan(&[]);
        let docs = result.iter().find(|r| r.dir == "docs").unwrap();
        let specs = result.iter().find(|r| r.dir == "specs").unwrap();
        assert!(docs.readme_only);
        assert!(!specs.readme_only);
    }

    #[test]
    fn scan_collects_frontmatter_doc_types_in_order() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/r1.md", "---\ndoc_type: rule\n---\n# Rule 1");
        write_file(tmp.path(), "docs/r2.md", "---\ndoc_type: rule\n---\n# Rule 2");
        write_file(tmp.path(), "docs/plain.md", "# No frontmatter");

        let result = Scanner::new(tmp.path()).scan(&[]);
        assert_eq!(
            result[0].frontmatter_doc_types,
            Some(vec!["rule".to_string(), "rule".to_string()])
        );
    }

    #[test]
    fn scan_mixed_doc_types_retained() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/d.md", "---\ndoc_type: design\n---\n");
        write_file(tmp.path(), "docs/r.md", "---\ndoc_type: rule\n---\n");

        let result = Scanner::new(tmp.path()).scan(&[]);
        let doc_types = result[0].frontmatter_doc_types.as_ref().unwrap();
        assert_eq!(doc_types, &["design", "rule"]);
    }

    #[test]
    fn scan_skip_prefixes() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");
        write_file(tmp.path(), "extra/notes/memo.md", "# Memo");

        let scanner = Scanner::new(tmp.path());
        let all: Vec<String> = scanner.scan(&[]).into_iter().map(|r| r.dir).collect();
        let skipped: Vec<String> = scanner
            .scan(&["extra".to_string()])
            .into_iter()
            .map(|r| r.dir)
            .collect();
        assert!(all.contains(&"extra/notes".to_string()));
        assert!(!skipped.contains(&"extra/notes".to_string()));
        assert!(skipped.contains(&"docs".to_string()));
    }

    #[test]
    fn empty_project_gives_empty_report() {
        let tmp = TempDir::new().unwrap();
        let report = Scanner::new(tmp.path()).report(&[]);
        assert!(report.directories.is_empty());
    }

    #[test]
    fn report_serializes_to_expected_json() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/guide.md", "# Guide");

        let report = Scanner::new(tmp.path()).report(&[]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["project_root"].is_string());
        let entry = &json["directories"][0];
        assert_eq!(entry["dir"], "docs");
        assert_eq!(entry["md_count"], 1);
        assert_eq!(entry["readme_only"], false);
        assert_eq!(entry["path_components"][0], "docs");
        assert!(entry["frontmatter_doc_types"].is_null());
    }

    #[test]
    fn skip_dirs_have_no_path_separators() {
        for d in SKIP_DIRS {
            assert!(!d.contains('/'), "skip dir with separator: {}", d);
        }
        for ind in SKIP_INDICATORS {
            assert!(!ind.contains('/'), "indicator with separator: {}", ind);
        }
    }
}
