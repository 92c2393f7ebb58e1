//! Doc type estimation from directory path segments.

use super::vocab::doc_type_for_segment;
use super::Category;

/// Estimate the doc_type for a directory path, scanning segments from the
/// deepest to the shallowest. Falls back to the category default.
pub fn estimate_doc_type(dir_path: &str, category: Category) -> &'static str {
    for segment in dir_path.split('/').rev() {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some(doc_type) = doc_type_for_segment(&segment.to_lowercase()) {
            return doc_type;
        }
    }

    match category {
        Category::Rules => "rule",
        Category::Specs => "spec",
    }
}
