//! Indentation-driven parser for the manifest subset.
//!
//! Recognized indentation levels: 0 (version, category keys), 2 (doc_type
//! keys), 4 (fields: `paths`, `exclude`, `description`), 6 (block-list
//! items). Lists may be inline flow arrays (`[a, b]`) or block lists of
//! `- item` lines; block items directly under the field key (indent 4) are
//! tolerated as well. Blank lines and `#` comments are ignored. A document
//! without a `version` key parses to `None`.

use indexmap::IndexMap;

use crate::classify::Category;
use crate::frontmatter::strip_quotes;

use super::{DocStructure, DocTypeEntry};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Paths,
    Exclude,
}

/// Parse manifest text. `None` means "manifest absent" — a missing version
/// key and any malformed structure are treated the same way.
pub fn parse_doc_structure(text: &str) -> Option<DocStructure> {
    let mut version: Option<String> = None;
    let mut specs: IndexMap<String, DocTypeEntry> = IndexMap::new();
    let mut rules: IndexMap<String, DocTypeEntry> = IndexMap::new();

    let mut current_category: Option<Category> = None;
    let mut current_doc_type: Option<String> = None;
    let mut current_field: Option<Field> = None;

    for line in text.lines() {
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        let indent = line.len() - line.trim_start().len();

        match indent {
            0 => {
                let Some((key, value)) = split_kv(content) else {
                    continue;
                };
                match key {
                    "version" => version = Some(strip_quotes(value).to_string()),
                    "specs" => {
                        current_category = Some(Category::Specs);
                        current_doc_type = None;
                        current_field = None;
                    }
                    "rules" => {
                        current_category = Some(Category::Rules);
                        current_doc_type = None;
                        current_field = None;
                    }
                    _ => {}
                }
            }

            2 => {
                let Some(category) = current_category else {
                    continue;
                };
                let Some((key, _)) = split_kv(content) else {
                    continue;
                };
                let map = match category {
                    Category::Specs => &mut specs,
                    Category::Rules => &mut rules,
                };
                map.entry(key.to_string()).or_default();
                current_doc_type = Some(key.to_string());
                current_field = None;
            }

            4 => {
                let (Some(category), Some(doc_type)) =
                    (current_category, current_doc_type.as_deref())
                else {
                    continue;
                };
                let map = match category {
                    Category::Specs => &mut specs,
                    Category::Rules => &mut rules,
                };
                let Some(entry) = map.get_mut(doc_type) else {
                    continue;
                };

                if let Some(item) = block_item(content) {
                    // Block item directly under the field key
                    match current_field {
                        Some(Field::Paths) => entry.paths.push(item),
                        Some(Field::Exclude) => entry.exclude.push(item),
                        None => {}
                    }
                } else if let Some((key, value)) = split_kv(content) {
                    match key {
                        "paths" => {
                            if value.starts_with('[') {
                                entry.paths = parse_flow_array(value);
                                current_field = None;
                            } else {
                                entry.paths = Vec::new();
                                current_field = Some(Field::Paths);
                            }
                        }
                        "exclude" => {
                            if value.starts_with('[') {
                                entry.exclude = parse_flow_array(value);
                                current_field = None;
                            } else {
                                entry.exclude = Vec::new();
                                current_field = Some(Field::Exclude);
                            }
                        }
                        "description" => {
                            entry.description = Some(strip_quotes(value).to_string());
                            current_field = None;
                        }
                        _ => current_field = None,
                    }
                }
            }

            6 => {
                let (Some(category), Some(doc_type), Some(field)) =
                    (current_category, current_doc_type.as_deref(), current_field)
                else {
                    continue;
                };
                let Some(item) = block_item(content) else {
                    continue;
                };
                let map = match category {
                    Category::Specs => &mut specs,
                    Category::Rules => &mut rules,
                };
                let Some(entry) = map.get_mut(doc_type) else {
                    continue;
                };
                match field {
                    Field::Paths => entry.paths.push(item),
                    Field::Exclude => entry.exclude.push(item),
                }
            }

            _ => {}
        }
    }

    let version = version?;
    Some(DocStructure {
        version,
        specs,
        rules,
    })
}

/// Split `key: value` at the first colon. Value may be empty.
fn split_kv(content: &str) -> Option<(&str, &str)> {
    let (key, value) = content.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Parse an inline flow array `[a, b, c]`.
fn parse_flow_array(value: &str) -> Vec<String> {
    let inner = value.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner
        .split(',')
        .map(|item| strip_quotes(item.trim()).to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// `- item` line content, quotes stripped.
fn block_item(content: &str) -> Option<String> {
    content
        .strip_prefix("- ")
        .map(|item| strip_quotes(item.trim()).to_string())
}
