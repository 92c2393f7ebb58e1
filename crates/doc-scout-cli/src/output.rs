//! Classification pretty-printers (yaml and summary formats).

use doc_scout_core::{AggregatedEntry, Aggregation, Category};

/// Classification result as YAML with confidence.
pub fn render_yaml(aggregation: &Aggregation) -> String {
    let mut out = String::from("classification:\n");

    for category in [Category::Rules, Category::Specs] {
        out.push_str(&format!("  {}:\n", category));
        let entries = aggregation.entries(category);
        if entries.is_empty() {
            out.push_str("    []\n");
            continue;
        }
        for entry in entries {
            out.push_str(&format!("    - dir: {}\n", entry.dir));
            out.push_str(&format!("      confidence: {}\n", entry.confidence));
            out.push_str(&format!("      doc_type: {}\n", entry.doc_type));
            out.push_str(&format!("      reason: \"{}\"\n", entry.reason));
        }
    }

    if !aggregation.skipped.is_empty() {
        out.push_str("  skip:\n");
        for entry in &aggregation.skipped {
            out.push_str(&format!("    - dir: {}\n", entry.dir));
            out.push_str(&format!("      reason: \"{}\"\n", entry.reason));
        }
    }

    out
}

/// Empty classification in YAML form.
pub fn render_yaml_empty() -> String {
    "classification:\n  rules: []\n  specs: []\n".to_string()
}

/// Human-readable classification summary.
pub fn render_summary(aggregation: &Aggregation) -> String {
    let mut out = String::new();

    for category in [Category::Rules, Category::Specs] {
        let entries = aggregation.entries(category);
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}:\n", category));
        for entry in entries {
            out.push_str(&format!("    {}\n", summary_line(entry)));
        }
    }

    if !aggregation.skipped.is_empty() {
        out.push_str("  skipped:\n");
        for entry in &aggregation.skipped {
            out.push_str(&format!("    {:<30} ({})\n", entry.dir, entry.reason));
        }
    }

    if out.is_empty() {
        out.push_str("  No document directories detected.\n");
    }

    out
}

fn summary_line(entry: &AggregatedEntry) -> String {
    format!(
        "{:<30} type={} ({}: {})",
        entry.dir, entry.doc_type, entry.confidence, entry.reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_scout_core::{Confidence, SkippedDirectory};

    fn sample() -> Aggregation {
        Aggregation {
            rules: vec![AggregatedEntry {
                dir: "rules/".to_string(),
                confidence: Confidence::Medium,
                reason: "dirname match: rules".to_string(),
                doc_type: "rule".to_string(),
            }],
            specs: Vec::new(),
            skipped: vec![SkippedDirectory {
                dir: "docs/".to_string(),
                reason: "README/CHANGELOG only".to_string(),
            }],
        }
    }

    #[test]
    fn yaml_lists_entries_and_skip() {
        let text = render_yaml(&sample());
        assert!(text.starts_with("classification:\n"));
        assert!(text.contains("  rules:\n    - dir: rules/\n"));
        assert!(text.contains("      confidence: medium\n"));
        assert!(text.contains("  specs:\n    []\n"));
        assert!(text.contains("  skip:\n    - dir: docs/\n"));
    }

    #[test]
    fn yaml_empty_shape() {
        assert_eq!(
            render_yaml_empty(),
            "classification:\n  rules: []\n  specs: []\n"
        );
    }

    #[test]
    fn summary_lines_padded() {
        let text = render_summary(&sample());
        assert!(text.contains("type=rule (medium: dirname match: rules)"));
        assert!(text.contains("(README/CHANGELOG only)"));
    }

    #[test]
    fn summary_empty_message() {
        let empty = Aggregation::default();
        assert_eq!(render_summary(&empty), "  No document directories detected.\n");
    }
}
