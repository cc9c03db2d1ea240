//! Small text utilities shared across the scraper:
//! identifier sanitization for screenshot/file names and whitespace
//! normalization for label matching.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that are invalid in file names on common filesystems
static FORBIDDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap());

/// Derive a filesystem-safe identifier from a display name.
///
/// Forbidden characters are stripped first, then spaces become
/// underscores, then the result is truncated to 100 characters. The
/// transform is idempotent.
pub fn sanitize_identifier(name: &str) -> String {
    let stripped = FORBIDDEN.replace_all(name, "");
    let underscored = stripped.replace(' ', "_");
    underscored.chars().take(100).collect()
}

/// Collapse runs of whitespace to single spaces and trim the ends,
/// matching `normalize-space()` semantics
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
