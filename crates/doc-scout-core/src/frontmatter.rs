//! Front matter extraction for Markdown files.
//!
//! A file has front matter iff its content begins with the literal marker
//! `---`; the block ends at the next occurrence of `---`. Only the simple
//! `key: value` line form is recognized.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const MARKER: &str = "---";
const HEAD_BYTES: usize = 4096;

/// Extract front matter from the first 4096 bytes of a file.
///
/// Returns `None` for unreadable files, files without a leading marker, and
/// blocks with no closing marker. A present but empty block yields an empty
/// map.
pub fn extract_front_matter(path: &Path) -> Option<HashMap<String, String>> {
    let mut file = File::open(path).ok()?;
    let mut buf = vec![0u8; HEAD_BYTES];
    let mut filled = 0;
    loop {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return None,
        }
        if filled == buf.len() {
            break;
        }
    }
    let content = String::from_utf8_lossy(&buf[..filled]);
    parse_front_matter(&content)
}

/// Parse front matter out of raw content. Exposed for callers that already
/// hold the text.
pub fn parse_front_matter(content: &str) -> Option<HashMap<String, String>> {
    if !content.starts_with(MARKER) {
        return None;
    }

    let end = content[MARKER.len()..].find(MARKER)? + MARKER.len();
    let block = &content[MARKER.len()..end];

    let mut result = HashMap::new();
    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            result.insert(key.trim().to_string(), strip_quotes(value.trim()).to_string());
        }
    }

    Some(result)
}

/// Strip one surrounding layer of double or single quotes.
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
