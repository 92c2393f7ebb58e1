pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod manifest;
pub mod project;
pub mod resolve;
pub mod scanner;

pub use aggregate::{aggregate_to_top_dirs, AggregatedEntry, Aggregation};
pub use classify::{
    classify_candidates, classify_directory, estimate_doc_type, Category, Classification,
    ClassificationOutcome, ClassifiedDirectory, Confidence, SkippedDirectory,
};
pub use config::{Config, ScanConfig};
pub use error::{DocScoutError, Result};
pub use frontmatter::{extract_front_matter, parse_front_matter};
pub use manifest::{
    build_doc_structure, DocStructure, DocTypeEntry, MANIFEST_FILENAME, MANIFEST_VERSION,
};
pub use project::find_project_root;
pub use resolve::{
    doc_type_to_review_type, resolve_targets, Question, Resolution, ResolveStatus, Resolver,
    ReviewType, CODE_EXTENSIONS,
};
pub use scanner::{
    CandidateDirectory, ScanReport, ScannedDirectory, Scanner, SKIP_DIRS, SKIP_INDICATORS,
};
