//! Manifest rendering and writing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{DocScoutError, Result};

use super::{DocStructure, MANIFEST_FILENAME, MANIFEST_VERSION};

/// Render a manifest to its textual format. The output parses back to an
/// equivalent structure.
pub fn render(structure: &DocStructure) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Generated by doc-scout on {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("version: \"{}\"\n", structure.version));

    for (name, map) in [("specs", &structure.specs), ("rules", &structure.rules)] {
        if map.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}:\n", name));
        for (doc_type, entry) in map {
            out.push_str(&format!("  {}:\n", doc_type));
            render_list(&mut out, "paths", &entry.paths);
            render_list(&mut out, "exclude", &entry.exclude);
            if let Some(description) = &entry.description {
                out.push_str(&format!("    description: \"{}\"\n", description));
            }
        }
    }

    out
}

/// Placeholder manifest for projects where nothing was detected.
pub fn render_placeholder() -> String {
    format!(
        "version: \"{}\"\n\n\
         # No document directories detected.\n\
         # Add your document paths manually.\n\
         # specs:\n\
         #   requirement:\n\
         #     paths: [specs/requirements/]\n",
        MANIFEST_VERSION
    )
}

/// Write the manifest to `<project_root>/.doc_structure.yaml`. Refuses to
/// overwrite an existing file unless `force` is set.
pub fn write(structure: &DocStructure, project_root: &Path, force: bool) -> Result<PathBuf> {
    write_text(&render(structure), project_root, force)
}

/// Write raw manifest text (used for the placeholder).
pub fn write_text(text: &str, project_root: &Path, force: bool) -> Result<PathBuf> {
    let path = project_root.join(MANIFEST_FILENAME);
    if path.exists() && !force {
        return Err(DocScoutError::ManifestExists { path });
    }
    fs::write(&path, text)?;
    Ok(path)
}

fn render_list(out: &mut String, field: &str, items: &[String]) {
    match items {
        [] => {}
        [single] => out.push_str(&format!("    {}: [{}]\n", field, single)),
        many => {
            out.push_str(&format!("    {}:\n", field));
            for item in many {
                out.push_str(&format!("      - {}\n", item));
            }
        }
    }
}
