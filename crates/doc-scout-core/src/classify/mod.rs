//! ディレクトリ分類
//!
//! 発見された Markdown ディレクトリを rules / specs のどちらかに分類する。
//! 戦略は優先順に front matter → ディレクトリ名 → 語彙ランキングの三段で、
//! 最初に結果を返した戦略が勝つ。全戦略が失敗したディレクトリは
//! 分類なしとしてスキップ扱いになる。

pub mod doc_type;
pub mod vocab;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::frontmatter::extract_front_matter;
use crate::scanner::{list_md_files, CandidateDirectory};

pub use doc_type::estimate_doc_type;

/// 分類カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rules,
    Specs,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rules => "rules",
            Category::Specs => "specs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分類の確信度。順序は Low < Medium < High。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一戦略の分類結果
#[derive(Debug, Clone)]
pub struct Classification {
    pub category: Category,
    pub confidence: Confidence,
    pub reason: String,
}

/// 分類済みディレクトリ
#[derive(Debug, Clone)]
pub struct ClassifiedDirectory {
    pub dir: String,
    pub category: Category,
    pub confidence: Confidence,
    pub reason: String,
}

/// 分類できなかった（またはスキップした）ディレクトリ
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDirectory {
    pub dir: String,
    pub reason: String,
}

/// 候補ディレクトリ一式の分類結果
#[derive(Debug, Clone, Default)]
pub struct ClassificationOutcome {
    pub classified: Vec<ClassifiedDirectory>,
    pub skipped: Vec<SkippedDirectory>,
}

type Strategy = fn(&Path, &str) -> Option<Classification>;

/// 評価順の戦略一覧。先勝ち。
const STRATEGIES: &[Strategy] = &[
    classify_by_frontmatter,
    classify_by_dirname,
    classify_by_terms,
];

/// 単一ディレクトリを分類する
pub fn classify_directory(project_root: &Path, dir: &str) -> Option<Classification> {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(project_root, dir))
}

/// スキャン結果の候補一覧をまとめて分類する
pub fn classify_candidates(
    project_root: &Path,
    candidates: &[CandidateDirectory],
) -> ClassificationOutcome {
    let mut outcome = ClassificationOutcome::default();

    for candidate in candidates {
        if candidate.readme_only {
            outcome.skipped.push(SkippedDirectory {
                dir: format!("{}/", candidate.path),
                reason: "README/CHANGELOG only".to_string(),
            });
            continue;
        }

        match classify_directory(project_root, &candidate.path) {
            Some(c) => outcome.classified.push(ClassifiedDirectory {
                dir: candidate.path.clone(),
                category: c.category,
                confidence: c.confidence,
                reason: c.reason,
            }),
            None => outcome.skipped.push(SkippedDirectory {
                dir: format!("{}/", candidate.path),
                reason: format!("unclassifiable ({} md files)", candidate.md_count),
            }),
        }
    }

    outcome
}

/// 戦略1: front matter の doc_type 集計
///
/// doc_type キーを持つファイルを母数とし、rules 側と specs 側の多い方が
/// 勝つ。全ファイルが一致すれば high、そうでなければ medium。同数は
/// 結果なし（次の戦略へ）。
pub fn classify_by_frontmatter(project_root: &Path, dir: &str) -> Option<Classification> {
    let full = project_root.join(dir);
    let md_files = list_md_files(&full).ok()?;
    if md_files.is_empty() {
        return None;
    }

    let mut rules_count = 0usize;
    let mut specs_count = 0usize;
    let mut total_with_fm = 0usize;

    for name in &md_files {
        let Some(fm) = extract_front_matter(&full.join(name)) else {
            continue;
        };
        let Some(doc_type) = fm.get("doc_type") else {
            continue;
        };

        total_with_fm += 1;
        let doc_type = doc_type.to_lowercase();
        if vocab::FRONTMATTER_RULE_TYPES.contains(&doc_type.as_str()) {
            rules_count += 1;
        } else if vocab::FRONTMATTER_SPEC_TYPES.contains(&doc_type.as_str()) {
            specs_count += 1;
        }
    }

    if rules_count + specs_count == 0 {
        return None;
    }

    if rules_count > specs_count {
        Some(Classification {
            category: Category::Rules,
            confidence: if rules_count == total_with_fm {
                Confidence::High
            } else {
                Confidence::Medium
            },
            reason: format!(
                "frontmatter doc_type=rule ({}/{} files)",
                rules_count, total_with_fm
            ),
        })
    } else if specs_count > rules_count {
        Some(Classification {
            category: Category::Specs,
            confidence: if specs_count == total_with_fm {
                Confidence::High
            } else {
                Confidence::Medium
            },
            reason: format!(
                "frontmatter doc_type=spec ({}/{} files)",
                specs_count, total_with_fm
            ),
        })
    } else {
        None
    }
}

/// 戦略2: ディレクトリ名ヒューリスティック
///
/// パスのセグメントを左から順に既知語彙と照合する。確信度は常に medium。
pub fn classify_by_dirname(_project_root: &Path, dir: &str) -> Option<Classification> {
    for segment in dir.split('/').filter(|s| !s.is_empty()) {
        let lower = segment.to_lowercase();
        if vocab::RULE_DIR_NAMES.contains(&lower.as_str()) {
            return Some(Classification {
                category: Category::Rules,
                confidence: Confidence::Medium,
                reason: format!("dirname match: {}", lower),
            });
        }
        if vocab::SPEC_DIR_NAMES.contains(&lower.as_str()) {
            return Some(Classification {
                category: Category::Specs,
                confidence: Confidence::Medium,
                reason: format!("dirname match: {}", lower),
            });
        }
    }
    None
}

/// 戦略3: 語彙ランキング（フォールバック）
///
/// 全 Markdown ファイルの本文を語彙リストで採点し、多い側のシェアが
/// 0.60 以上なら分類する。0.75 以上で high。
pub fn classify_by_terms(project_root: &Path, dir: &str) -> Option<Classification> {
    let full = project_root.join(dir);
    let md_files = list_md_files(&full).ok()?;
    if md_files.is_empty() {
        return None;
    }

    let mut total_rule = 0usize;
    let mut total_spec = 0usize;

    for name in &md_files {
        let (r, s) = score_file_terms(&full.join(name));
        total_rule += r;
        total_spec += s;
    }

    let total = total_rule + total_spec;
    if total == 0 {
        return None;
    }

    let ratio = total_rule.max(total_spec) as f64 / total as f64;
    if ratio < 0.60 {
        return None;
    }

    let confidence = if ratio >= 0.75 {
        Confidence::High
    } else {
        Confidence::Medium
    };
    let category = if total_rule > total_spec {
        Category::Rules
    } else {
        Category::Specs
    };

    Some(Classification {
        category,
        confidence,
        reason: format!(
            "term_ranking: rule_score={}, spec_score={}",
            total_rule, total_spec
        ),
    })
}

/// ファイル1つを語彙リストで採点する。読めないファイルは (0, 0)。
fn score_file_terms(path: &Path) -> (usize, usize) {
    let Ok(content) = fs::read_to_string(path) else {
        return (0, 0);
    };
    let content = content.to_lowercase();

    let rule_score: usize = vocab::RULE_TERMS
        .iter()
        .map(|re| re.find_iter(&content).count())
        .sum();
    let spec_score: usize = vocab::SPEC_TERMS
        .iter()
        .map(|re| re.find_iter(&content).count())
        .sum();

    (rule_score, spec_score)
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

    #[test]
    fn confidence_ordering_is_ordinal() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        // not lexicographic: "high" < "low" as strings
        assert!(Confidence::High > Confidence::Low);
        assert_eq!(
            [Confidence::Medium, Confidence::High, Confidence::Low]
                .into_iter()
                .max(),
            Some(Confidence::High)
        );
    }

    #[test]
    fn frontmatter_unanimous_is_high() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "---\ndoc_type: rule\n---\n");
        write_file(tmp.path(), "docs/b.md", "---\ndoc_type: guideline\n---\n");

        let c = classify_by_frontmatter(tmp.path(), "docs").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert_eq!(c.confidence, Confidence::High);
        assert_eq!(c.reason, "frontmatter doc_type=rule (2/2 files)");
    }

    #[test]
    fn frontmatter_majority_is_medium() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "---\ndoc_type: design\n---\n");
        write_file(tmp.path(), "docs/b.md", "---\ndoc_type: spec\n---\n");
        write_file(tmp.path(), "docs/c.md", "---\ndoc_type: rule\n---\n");

        let c = classify_by_frontmatter(tmp.path(), "docs").unwrap();
        assert_eq!(c.category, Category::Specs);
        assert_eq!(c.confidence, Confidence::Medium);
    }

    #[test]
    fn frontmatter_unrecognized_value_demotes_confidence() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "---\ndoc_type: rule\n---\n");
        write_file(tmp.path(), "docs/b.md", "---\ndoc_type: banana\n---\n");

        let c = classify_by_frontmatter(tmp.path(), "docs").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert_eq!(c.confidence, Confidence::Medium);
        assert_eq!(c.reason, "frontmatter doc_type=rule (1/2 files)");
    }

    #[test]
    fn frontmatter_tie_yields_none() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "---\ndoc_type: rule\n---\n");
        write_file(tmp.path(), "docs/b.md", "---\ndoc_type: design\n---\n");

        assert!(classify_by_frontmatter(tmp.path(), "docs").is_none());
    }

    #[test]
    fn frontmatter_absent_yields_none() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "# Plain");

        assert!(classify_by_frontmatter(tmp.path(), "docs").is_none());
    }

    #[test]
    fn dirname_rules_match() {
        let tmp = TempDir::new().unwrap();
        let c = classify_by_dirname(tmp.path(), "rules/coding").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert_eq!(c.confidence, Confidence::Medium);
        assert_eq!(c.reason, "dirname match: rules");
    }

    #[test]
    fn dirname_first_segment_wins() {
        let tmp = TempDir::new().unwrap();
        // "specs" appears before "rules" scanning left to right
        let c = classify_by_dirname(tmp.path(), "specs/rules").unwrap();
        assert_eq!(c.category, Category::Specs);
    }

    #[test]
    fn dirname_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let c = classify_by_dirname(tmp.path(), "Docs/Guidelines").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert_eq!(c.reason, "dirname match: guidelines");
    }

    #[test]
    fn dirname_no_match() {
        let tmp = TempDir::new().unwrap();
        assert!(classify_by_dirname(tmp.path(), "docs/misc").is_none());
    }

    #[test]
    fn terms_dominant_rules_high() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "docs/style.md",
            "You must always do this. You must never do that. This rule is policy.",
        );

        let c = classify_by_terms(tmp.path(), "docs").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert_eq!(c.confidence, Confidence::High);
    }

    #[test]
    fn terms_share_at_exactly_sixty_percent_classifies() {
        let tmp = TempDir::new().unwrap();
        // rule_score=3 (must x3), spec_score=2 (architecture x2): share 0.60
        write_file(
            tmp.path(),
            "docs/a.md",
            "must must must architecture architecture",
        );

        let c = classify_by_terms(tmp.path(), "docs").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert_eq!(c.confidence, Confidence::Medium);
        assert_eq!(c.reason, "term_ranking: rule_score=3, spec_score=2");
    }

    #[test]
    fn terms_even_split_yields_none() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "must architecture");

        assert!(classify_by_terms(tmp.path(), "docs").is_none());
    }

    #[test]
    fn terms_no_hits_yields_none() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/a.md", "nothing relevant here");

        assert!(classify_by_terms(tmp.path(), "docs").is_none());
    }

    #[test]
    fn strategy_priority_frontmatter_beats_dirname() {
        let tmp = TempDir::new().unwrap();
        // dirname says specs, front matter says rules
        write_file(tmp.path(), "specs/a.md", "---\ndoc_type: rule\n---\n");

        let c = classify_directory(tmp.path(), "specs").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert!(c.reason.starts_with("frontmatter"));
    }

    #[test]
    fn strategy_falls_through_to_dirname() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "rules/a.md", "# no front matter, few terms");

        let c = classify_directory(tmp.path(), "rules").unwrap();
        assert_eq!(c.category, Category::Rules);
        assert!(c.reason.starts_with("dirname"));
    }

    #[test]
    fn candidates_readme_only_skipped_with_reason() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "docs/README.md", "# Readme");

        let candidates = vec![CandidateDirectory {
            path: "docs".to_string(),
            md_count: 1,
            readme_only: true,
        }];
        let outcome = classify_candidates(tmp.path(), &candidates);
        assert!(outcome.classified.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].dir, "docs/");
        assert_eq!(outcome.skipped[0].reason, "README/CHANGELOG only");
    }

    #[test]
    fn candidates_unclassifiable_skipped_with_count() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "notes/a.md", "nothing to see");
        write_file(tmp.path(), "notes/b.md", "still nothing");

        let candidates = vec![CandidateDirectory {
            path: "notes".to_string(),
            md_count: 2,
            readme_only: false,
        }];
        let outcome = classify_candidates(tmp.path(), &candidates);
        assert!(outcome.classified.is_empty());
        assert_eq!(outcome.skipped[0].reason, "unclassifiable (2 md files)");
    }
}
