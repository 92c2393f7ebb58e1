//! Path display formatting for terminal output.

use std::path::Path;

const ELLIPSIS: char = '\u{2026}';

/// Replace the home directory prefix with `~`.
pub fn replace_home(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.display().to_string();
    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(&format!("{}/", home)) {
        Some(rest) => format!("~/{}", rest),
        None => path.to_string(),
    }
}

/// Truncate the middle of a long path, keeping the first segment and the
/// last two: `~/data/…/apps/monitor`.
pub fn truncate_middle(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let parts: Vec<&str> = path.split('/').collect();
    let n = parts.len();
    if n <= 3 {
        return path.to_string();
    }

    let head = parts[0];
    for i in 1..n - 2 {
        let keep = n - 1 - i;
        let candidate = format!("{}/{}/{}", head, ELLIPSIS, parts[n - keep..].join("/"));
        if candidate.chars().count() <= max_len {
            return candidate;
        }
    }

    format!("{}/{}/{}", head, ELLIPSIS, parts[n - 2..].join("/"))
}

/// Shortest readable form of an absolute path.
pub fn format_path(path: &Path) -> String {
    replace_home(&path.display().to_string())
}
