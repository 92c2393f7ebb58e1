//! Aggregation of classified subdirectories into top-level entries.
//!
//! Entries sharing a category, top-level segment, and doc type collapse
//! into one entry for the top-level segment. A top-level segment hosting
//! more than one category is "mixed": its entries are never collapsed, so
//! incompatible taxonomies are never merged under one path.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::classify::{
    estimate_doc_type, Category, ClassificationOutcome, Confidence, SkippedDirectory,
};

/// One aggregated manifest entry. `dir` always ends in `/`.
#[derive(Debug, Clone)]
pub struct AggregatedEntry {
    pub dir: String,
    pub confidence: Confidence,
    pub reason: String,
    pub doc_type: String,
}

/// Aggregated classification, ready for manifest generation.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub rules: Vec<AggregatedEntry>,
    pub specs: Vec<AggregatedEntry>,
    pub skipped: Vec<SkippedDirectory>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.specs.is_empty()
    }

    pub fn entries(&self, category: Category) -> &[AggregatedEntry] {
        match category {
            Category::Rules => &self.rules,
            Category::Specs => &self.specs,
        }
    }
}

struct Enriched {
    dir: String,
    category: Category,
    confidence: Confidence,
    reason: String,
    doc_type: &'static str,
    top_dir: String,
}

/// Aggregate per-directory classifications to top-level directories.
///
/// Groups by (category, top-level segment, doc type). Groups under a mixed
/// top-level segment keep every individual path; other groups collapse to
/// the top-level segment when they have several members or their single
/// member already is the top-level directory.
pub fn aggregate_to_top_dirs(outcome: &ClassificationOutcome) -> Aggregation {
    let enriched: Vec<Enriched> = outcome
        .classified
        .iter()
        .map(|c| {
            let dir = c.dir.trim_end_matches('/').to_string();
            let top_dir = dir.split('/').next().unwrap_or(&dir).to_string();
            Enriched {
                doc_type: estimate_doc_type(&dir, c.category),
                top_dir,
                dir,
                category: c.category,
                confidence: c.confidence,
                reason: c.reason.clone(),
            }
        })
        .collect();

    // Group by (category, top_dir, doc_type), preserving input order
    let mut groups: IndexMap<(Category, String, &'static str), Vec<&Enriched>> = IndexMap::new();
    for entry in &enriched {
        groups
            .entry((entry.category, entry.top_dir.clone(), entry.doc_type))
            .or_default()
            .push(entry);
    }

    // A top dir hosting more than one category is mixed
    let mut top_dir_categories: HashMap<&str, HashSet<Category>> = HashMap::new();
    for (category, top_dir, _) in groups.keys() {
        top_dir_categories
            .entry(top_dir)
            .or_default()
            .insert(*category);
    }

    let mut result = Aggregation {
        skipped: outcome.skipped.clone(),
        ..Aggregation::default()
    };

    for ((category, top_dir, doc_type), entries) in &groups {
        let mixed = top_dir_categories[top_dir.as_str()].len() > 1;
        let bucket = match category {
            Category::Rules => &mut result.rules,
            Category::Specs => &mut result.specs,
        };

        if mixed {
            for e in entries {
                bucket.push(AggregatedEntry {
                    dir: format!("{}/", e.dir),
                    confidence: e.confidence,
                    reason: e.reason.clone(),
                    doc_type: doc_type.to_string(),
                });
            }
        } else if entries.len() > 1 || entries[0].dir == *top_dir {
            let confidence = entries
                .iter()
                .map(|e| e.confidence)
                .max()
                .unwrap_or(Confidence::Low);
            // A single member that already is the top dir keeps its own
            // reason, so aggregation is idempotent on its own output
            let reason = if entries.len() > 1 {
                format!(
                    "aggregated from {} subdirs: {}",
                    entries.len(),
                    entries[0].reason
                )
            } else {
                entries[0].reason.clone()
            };
            bucket.push(AggregatedEntry {
                dir: format!("{}/", top_dir),
                confidence,
                reason,
                doc_type: doc_type.to_string(),
            });
        } else {
            let e = entries[0];
            bucket.push(AggregatedEntry {
                dir: format!("{}/", e.dir),
                confidence: e.confidence,
                reason: e.reason.clone(),
                doc_type: doc_type.to_string(),
            });
        }
    }

    result
}
