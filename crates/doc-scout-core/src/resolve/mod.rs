//! Review target resolution against a parsed manifest.
//!
//! Maps user-given targets (files, directories, feature names) to a review
//! type and a set of target files, asking structured questions when the
//! input is ambiguous or incomplete. A missing manifest is a first-class
//! error status, never a crash.

pub mod features;
pub mod pattern;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::classify::Category;
use crate::manifest::{DocStructure, MANIFEST_FILENAME};

use features::{detect_features, find_feature_subdirs, find_feature_target_files};
use pattern::{is_excluded, path_matches_pattern};

/// Source code file extensions (lowercase, without the dot).
pub const CODE_EXTENSIONS: &[&str] = &[
    "swift", "kt", "java", "ts", "tsx", "js", "jsx", "py", "go", "rs", "c", "cpp", "h", "m",
    "mm",
];

/// Base document locations that always review as generic.
const GENERIC_BASE_PATTERNS: &[&str] = &[".claude/skills/", ".claude/commands/"];

/// Root-level files that review as generic.
const GENERIC_ROOT_FILES: &[&str] = &["CLAUDE.md", "README.md"];

/// The kind of review a target calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    Requirement,
    Design,
    Plan,
    Code,
    Generic,
}

impl ReviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::Requirement => "requirement",
            ReviewType::Design => "design",
            ReviewType::Plan => "plan",
            ReviewType::Code => "code",
            ReviewType::Generic => "generic",
        }
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a manifest category + doc_type name to a review type.
pub fn doc_type_to_review_type(category: Category, doc_type: &str) -> ReviewType {
    match category {
        Category::Specs => match doc_type {
            "requirement" => ReviewType::Requirement,
            "design" => ReviewType::Design,
            "plan" => ReviewType::Plan,
            _ => ReviewType::Generic,
        },
        Category::Rules => ReviewType::Generic,
    }
}

/// Overall resolution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStatus {
    Resolved,
    NeedsInput,
    Error,
}

/// An outstanding question raised during resolution.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub key: String,
    pub message: String,
    pub options: Vec<String>,
}

impl Question {
    fn new(key: &str, message: String, options: Vec<String>) -> Self {
        Self {
            key: key.to_string(),
            message,
            options,
        }
    }
}

/// The resolution JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub status: ResolveStatus,
    pub has_doc_structure: bool,
    #[serde(rename = "type")]
    pub review_type: Option<ReviewType>,
    pub target_files: Vec<String>,
    pub features: Vec<String>,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn type_options() -> Vec<String> {
    ["requirement", "design", "plan", "code", "generic"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Resolve targets against the project's manifest. A missing (or
/// unparsable) manifest yields the terminal error status.
pub fn resolve_targets(project_root: &Path, targets: &[String]) -> Resolution {
    match DocStructure::load(project_root) {
        Some(structure) => Resolver::new(project_root, &structure).resolve(targets),
        None => Resolution {
            status: ResolveStatus::Error,
            has_doc_structure: false,
            review_type: None,
            target_files: Vec::new(),
            features: Vec::new(),
            questions: Vec::new(),
            error: Some(format!(
                "{} not found. Run `doc-scout init` to create it.",
                MANIFEST_FILENAME
            )),
        },
    }
}

/// Target resolver bound to one project root and manifest.
pub struct Resolver<'a> {
    project_root: &'a Path,
    structure: &'a DocStructure,
}

impl<'a> Resolver<'a> {
    pub fn new(project_root: &'a Path, structure: &'a DocStructure) -> Self {
        Self {
            project_root,
            structure,
        }
    }

    /// Review type declared by the manifest for a path, honoring each
    /// doc_type's exclude list.
    pub fn detect_type_from_doc_structure(&self, path: &str) -> Option<ReviewType> {
        for category in [Category::Specs, Category::Rules] {
            for (doc_type, entry) in self.structure.category(category) {
                if is_excluded(path, &entry.exclude) {
                    continue;
                }
                for declared in &entry.paths {
                    if path_matches_pattern(path, declared) {
                        return Some(doc_type_to_review_type(category, doc_type));
                    }
                }
            }
        }
        None
    }

    /// Generic review detection: fixed base patterns, the manifest's rules
    /// paths (exclusion-aware), and root-level generic files.
    fn detect_generic_type(&self, path: &str) -> Option<ReviewType> {
        for base in GENERIC_BASE_PATTERNS {
            if generic_pattern_hits(path, base) {
                return Some(ReviewType::Generic);
            }
        }

        for entry in self.structure.rules.values() {
            if is_excluded(path, &entry.exclude) {
                continue;
            }
            for declared in &entry.paths {
                if generic_pattern_hits(path, declared) {
                    return Some(ReviewType::Generic);
                }
            }
        }

        let trimmed = path.trim_end_matches('/');
        if !trimmed.contains('/') && GENERIC_ROOT_FILES.contains(&trimmed) {
            return Some(ReviewType::Generic);
        }

        None
    }

    /// Review type for a single path: code extension, manifest match,
    /// generic patterns, in that order.
    pub fn detect_type_from_path(&self, path: &str) -> Option<ReviewType> {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        if let Some(ext) = ext {
            if CODE_EXTENSIONS.contains(&ext.as_str()) {
                return Some(ReviewType::Code);
            }
        }

        if let Some(review_type) = self.detect_type_from_doc_structure(path) {
            return Some(review_type);
        }

        self.detect_generic_type(path)
    }

    /// Review type and target files for a directory. Any code file makes
    /// the whole directory a code target; otherwise the first Markdown
    /// file's type decides and all Markdown files are returned.
    pub fn detect_type_from_dir(&self, dir: &str) -> (Option<ReviewType>, Vec<String>) {
        let full = self.project_root.join(dir);
        if !full.is_dir() {
            return (None, Vec::new());
        }

        let mut code_files = Vec::new();
        for ext in CODE_EXTENSIONS {
            let pattern = format!("{}/**/*.{}", full.display(), ext);
            if let Ok(paths) = glob::glob(&pattern) {
                code_files.extend(paths.flatten().filter(|p| p.is_file()));
            }
        }
        if !code_files.is_empty() {
            let mut rel: Vec<String> = code_files
                .iter()
                .map(|p| features::rel_posix(self.project_root, p))
                .collect();
            rel.sort();
            return (Some(ReviewType::Code), rel);
        }

        let mut md_files: Vec<String> = features::glob_md_files(&full)
            .iter()
            .map(|p| features::rel_posix(self.project_root, p))
            .collect();
        md_files.sort();
        if let Some(first) = md_files.first() {
            let review_type = self.detect_type_from_path(first);
            return (review_type, md_files);
        }

        (None, Vec::new())
    }

    /// Feature names declared by the manifest's wildcard patterns.
    pub fn features(&self) -> Vec<String> {
        detect_features(self.project_root, self.structure)
    }

    /// Resolve a list of raw targets into a Resolution.
    pub fn resolve(&self, targets: &[String]) -> Resolution {
        let features = self.features();
        let mut result = Resolution {
            status: ResolveStatus::Resolved,
            has_doc_structure: true,
            review_type: None,
            target_files: Vec::new(),
            features,
            questions: Vec::new(),
            error: None,
        };

        match targets {
            [] => self.resolve_unspecified(&mut result),
            [single] => self.resolve_single(single, &mut result),
            many => self.resolve_multiple(many, &mut result),
        }

        if !result.questions.is_empty() {
            result.status = ResolveStatus::NeedsInput;
        }
        result
    }

    fn resolve_unspecified(&self, result: &mut Resolution) {
        if result.features.is_empty() {
            result.questions.push(Question::new(
                "target",
                "Specify the file or directory to review.".to_string(),
                Vec::new(),
            ));
        } else {
            result.questions.push(Question::new(
                "feature",
                "Select the feature to review (or specify a path for code review)."
                    .to_string(),
                result.features.clone(),
            ));
        }
    }

    fn resolve_single(&self, target: &str, result: &mut Resolution) {
        let full = self.project_root.join(target);

        if full.is_file() {
            result.review_type = self.detect_type_from_path(target);
            result.target_files = vec![target.to_string()];

            if result.review_type.is_none() {
                result.questions.push(Question::new(
                    "type",
                    format!(
                        "Cannot determine the review type of '{}'. Select a type.",
                        target
                    ),
                    type_options(),
                ));
            }
        } else if full.is_dir() {
            let (review_type, files) = self.detect_type_from_dir(target);
            result.review_type = review_type;
            result.target_files = files;

            if result.target_files.is_empty() {
                result.questions.push(Question::new(
                    "target",
                    format!(
                        "No review target files found in directory '{}'. Specify a path.",
                        target
                    ),
                    Vec::new(),
                ));
            } else if result.review_type.is_none() {
                result.questions.push(Question::new(
                    "type",
                    format!("Select the review type for directory '{}'.", target),
                    type_options(),
                ));
            }
        } else if result.features.iter().any(|f| f == target) {
            let available = find_feature_subdirs(self.project_root, self.structure, target);

            match available.as_slice() {
                [only] => {
                    result.review_type = Some(*only);
                    result.target_files = find_feature_target_files(
                        self.project_root,
                        self.structure,
                        target,
                        *only,
                    );
                }
                [] => {
                    result.questions.push(Question::new(
                        "target",
                        format!(
                            "No reviewable documents found for feature '{}'. Specify a path.",
                            target
                        ),
                        Vec::new(),
                    ));
                }
                several => {
                    result.questions.push(Question::new(
                        "type",
                        format!("Which type of feature '{}' should be reviewed?", target),
                        several.iter().map(|t| t.as_str().to_string()).collect(),
                    ));
                }
            }
        } else {
            result.questions.push(Question::new(
                "target",
                format!(
                    "'{}' not found. Specify the file or directory to review.",
                    target
                ),
                Vec::new(),
            ));
        }
    }

    fn resolve_multiple(&self, targets: &[String], result: &mut Resolution) {
        let mut valid = Vec::new();
        let mut missing = Vec::new();

        for target in targets {
            if self.project_root.join(target).is_file() {
                valid.push(target.clone());
            } else {
                missing.push(target.clone());
            }
        }

        result.target_files = valid;

        if !missing.is_empty() {
            result.questions.push(Question::new(
                "target",
                format!("Files not found: {}", missing.join(", ")),
                Vec::new(),
            ));
            return;
        }

        // The review type follows the first file
        result.review_type = self.detect_type_from_path(&result.target_files[0]);
        if result.review_type.is_none() {
            result.questions.push(Question::new(
                "type",
                "Cannot determine the review type. Select a type.".to_string(),
                type_options(),
            ));
        }
    }
}

/// Generic location check: prefix match or containment as a path infix.
fn generic_pattern_hits(path: &str, pattern: &str) -> bool {
    path.starts_with(pattern) || path.contains(&format!("/{}", pattern))
}
