//! 分類語彙の定義
//!
//! カテゴリ分類（rules/specs）と doc_type 推定に使う固定語彙。
//! プロセス全体で読み取り専用。

use once_cell::sync::Lazy;
use regex::Regex;

/// front matter の doc_type 値のうち rules カテゴリを示すもの
pub const FRONTMATTER_RULE_TYPES: &[&str] =
    &["rule", "rules", "guideline", "standard", "workflow"];

/// front matter の doc_type 値のうち specs カテゴリを示すもの
pub const FRONTMATTER_SPEC_TYPES: &[&str] = &[
    "requirement",
    "requirements",
    "design",
    "plan",
    "specification",
    "spec",
    "specs",
];

/// rules カテゴリを示すディレクトリ名
pub const RULE_DIR_NAMES: &[&str] = &[
    "rules",
    "rule",
    "guidelines",
    "standards",
    "policies",
    "conventions",
];

/// specs カテゴリを示すディレクトリ名
pub const SPEC_DIR_NAMES: &[&str] = &[
    "specs",
    "spec",
    "specifications",
    "requirements",
    "design",
    "designs",
    "plans",
    "features",
    "proposals",
];

/// ディレクトリ名 → doc_type の対応表
pub const DOC_TYPE_NAMES: &[(&str, &str)] = &[
    ("requirements", "requirement"),
    ("requirement", "requirement"),
    ("req", "requirement"),
    ("reqs", "requirement"),
    ("designs", "design"),
    ("design", "design"),
    ("des", "design"),
    ("plans", "plan"),
    ("plan", "plan"),
    ("rules", "rule"),
    ("rule", "rule"),
    ("workflows", "workflow"),
    ("workflow", "workflow"),
    ("guides", "guide"),
    ("guide", "guide"),
    ("references", "reference"),
    ("reference", "reference"),
    ("ref", "reference"),
    ("api", "api"),
    ("apis", "api"),
    ("specs", "spec"),
    ("spec", "spec"),
    ("specifications", "spec"),
    ("standards", "rule"),
    ("conventions", "rule"),
    ("policies", "rule"),
    ("guidelines", "guide"),
];

const RULE_TERM_PATTERNS: &[&str] = &[
    r"\bmust\b",
    r"\bshall\b",
    r"\bshould not\b",
    r"\bmust not\b",
    r"\bconvention\b",
    r"\bstandard\b",
    r"\bguideline\b",
    r"\bprohibited\b",
    r"\bnaming\b",
    r"\bworkflow\b",
    r"\brule\b",
    r"\bpolicy\b",
    r"\bdo not\b",
    r"\bforbidden\b",
    r"\bcompliance\b",
    r"\bbest practice\b",
];

const SPEC_TERM_PATTERNS: &[&str] = &[
    r"\brequirement\b",
    r"\bdesign\b",
    r"\bfeature\b",
    r"\bspecification\b",
    r"\barchitecture\b",
    r"\bcomponent\b",
    r"\buse case\b",
    r"\bacceptance criteria\b",
    r"\buser story\b",
    r"\bfunctional\b",
    r"\bnon-functional\b",
    r"\binterface\b",
    r"\bapi\b",
    r"\bschema\b",
    r"\bdata model\b",
    r"\bsequence\b",
    r"\bstate\b",
    r"\bplan\b",
];

/// rules カテゴリを示す語のコンパイル済み正規表現
pub static RULE_TERMS: Lazy<Vec<Regex>> = Lazy::new(|| compile(RULE_TERM_PATTERNS));

/// specs カテゴリを示す語のコンパイル済み正規表現
pub static SPEC_TERMS: Lazy<Vec<Regex>> = Lazy::new(|| compile(SPEC_TERM_PATTERNS));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).expect("static term pattern"))
        .collect()
}

/// ディレクトリ名セグメントに対応する doc_type を返す
pub fn doc_type_for_segment(segment: &str) -> Option<&'static str> {
    DOC_TYPE_NAMES
        .iter()
        .find(|(name, _)| *name == segment)
        .map(|(_, doc_type)| *doc_type)
}
