//! Feature discovery through wildcard path patterns.
//!
//! A "feature" is a real subdirectory standing in for the `*` segment of a
//! specs path pattern, e.g. `login` for `specs/*/requirements/`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::manifest::DocStructure;
use crate::project::to_posix;

use super::pattern::is_excluded;
use super::{doc_type_to_review_type, ReviewType};
use crate::classify::Category;

/// Enumerate feature names by expanding every wildcard specs pattern
/// against the real filesystem. Sorted and de-duplicated; names on a
/// doc_type's exclude list do not appear.
pub fn detect_features(project_root: &Path, structure: &DocStructure) -> Vec<String> {
    let mut features = BTreeSet::new();

    for entry in structure.specs.values() {
        for pattern in &entry.paths {
            let parts: Vec<&str> = pattern.trim_end_matches('/').split('/').collect();
            let Some(star_idx) = parts.iter().position(|p| *p == "*") else {
                continue;
            };

            let prefix = parts[..star_idx].join("/");
            let prefix_dir = if prefix.is_empty() {
                project_root.to_path_buf()
            } else {
                project_root.join(&prefix)
            };
            if !prefix_dir.is_dir() {
                continue;
            }

            let suffix_parts = &parts[star_idx + 1..];
            let Ok(read) = fs::read_dir(&prefix_dir) else {
                continue;
            };
            for dir_entry in read.flatten() {
                let name = dir_entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') || !dir_entry.path().is_dir() {
                    continue;
                }
                if entry.exclude.iter().any(|x| *x == name) {
                    continue;
                }
                if suffix_parts.is_empty() {
                    features.insert(name);
                } else {
                    let mut check = dir_entry.path();
                    for part in suffix_parts {
                        check = check.join(part);
                    }
                    if check.is_dir() {
                        features.insert(name);
                    }
                }
            }
        }
    }

    features.into_iter().collect()
}

/// Review types available for a feature: a type is available when the
/// wildcard pattern made concrete with the feature name exists as a
/// directory holding at least one Markdown file.
pub fn find_feature_subdirs(
    project_root: &Path,
    structure: &DocStructure,
    feature: &str,
) -> Vec<ReviewType> {
    let mut available = Vec::new();

    for (doc_type, entry) in &structure.specs {
        let review_type = doc_type_to_review_type(Category::Specs, doc_type);
        for pattern in &entry.paths {
            if !pattern.contains('*') {
                continue;
            }
            let concrete = pattern.replacen('*', feature, 1);
            if is_excluded(&concrete, &entry.exclude) {
                continue;
            }
            let dir = project_root.join(concrete.trim_end_matches('/'));
            if dir.is_dir()
                && !glob_md_files(&dir).is_empty()
                && !available.contains(&review_type)
            {
                available.push(review_type);
            }
        }
    }

    available
}

/// Markdown files for a feature and review type: the first concrete
/// wildcard directory that yields any, sorted, relative to the project
/// root.
pub fn find_feature_target_files(
    project_root: &Path,
    structure: &DocStructure,
    feature: &str,
    review_type: ReviewType,
) -> Vec<String> {
    for (doc_type, entry) in &structure.specs {
        if doc_type_to_review_type(Category::Specs, doc_type) != review_type {
            continue;
        }
        for pattern in &entry.paths {
            if !pattern.contains('*') {
                continue;
            }
            let concrete = pattern.replacen('*', feature, 1);
            if is_excluded(&concrete, &entry.exclude) {
                continue;
            }
            let dir = project_root.join(concrete.trim_end_matches('/'));
            let mut files: Vec<String> = glob_md_files(&dir)
                .iter()
                .map(|p| rel_posix(project_root, p))
                .collect();
            if !files.is_empty() {
                files.sort();
                return files;
            }
        }
    }

    Vec::new()
}

/// Recursive `*.md` collection under a directory.
pub(crate) fn glob_md_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*.md", dir.display());
    let mut files = Vec::new();
    if let Ok(paths) = glob::glob(&pattern) {
        files.extend(paths.flatten().filter(|p| p.is_file()));
    }
    files
}

pub(crate) fn rel_posix(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map(to_posix)
        .unwrap_or_else(|_| path.display().to_string())
}
