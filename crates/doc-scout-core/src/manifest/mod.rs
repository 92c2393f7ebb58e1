//! The document structure manifest: model, parser, and writer.
//!
//! The manifest is a narrow, indentation-based subset of YAML. It is parsed
//! by a dedicated state machine rather than a general YAML library so that
//! documents the format must reject (notably a missing `version`) are not
//! silently accepted.

pub mod parser;
pub mod writer;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::aggregate::Aggregation;
use crate::classify::Category;

/// Manifest file name, relative to the project root.
pub const MANIFEST_FILENAME: &str = ".doc_structure.yaml";

/// Manifest format version written by this tool.
pub const MANIFEST_VERSION: &str = "1.0";

/// One doc_type entry inside a category section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTypeEntry {
    /// Path patterns: literal relative paths or paths with one `*` segment
    pub paths: Vec<String>,
    /// Path-segment names that disqualify any path containing them
    pub exclude: Vec<String>,
    pub description: Option<String>,
}

/// Parsed document structure manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocStructure {
    pub version: String,
    pub specs: IndexMap<String, DocTypeEntry>,
    pub rules: IndexMap<String, DocTypeEntry>,
}

impl DocStructure {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..Self::default()
        }
    }

    /// Load and parse the manifest of a project. Returns `None` when the
    /// file is missing, unreadable, or does not parse — callers treat all
    /// three as "manifest absent".
    pub fn load(project_root: &Path) -> Option<Self> {
        let path = project_root.join(MANIFEST_FILENAME);
        let content = fs::read_to_string(path).ok()?;
        parser::parse_doc_structure(&content)
    }

    pub fn category(&self, category: Category) -> &IndexMap<String, DocTypeEntry> {
        match category {
            Category::Rules => &self.rules,
            Category::Specs => &self.specs,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut IndexMap<String, DocTypeEntry> {
        match category {
            Category::Rules => &mut self.rules,
            Category::Specs => &mut self.specs,
        }
    }

    /// Every declared path of the rules category.
    pub fn rules_paths(&self) -> Vec<&str> {
        self.rules
            .values()
            .flat_map(|entry| entry.paths.iter().map(String::as_str))
            .collect()
    }
}

/// Build a manifest from an aggregated classification. Paths group under
/// their estimated doc_type, specs first, in aggregation order.
pub fn build_doc_structure(aggregation: &Aggregation) -> DocStructure {
    let mut structure = DocStructure::new(MANIFEST_VERSION);

    for category in [Category::Specs, Category::Rules] {
        for entry in aggregation.entries(category) {
            structure
                .category_mut(category)
                .entry(entry.doc_type.clone())
                .or_default()
                .paths
                .push(entry.dir.clone());
        }
    }

    structure
}
