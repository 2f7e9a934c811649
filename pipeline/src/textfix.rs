//! Repairs for text mangled by column wrapping in the source tables.

use lazy_regex::{regex_find, regex_replace, regex_replace_all};

/// Cleans leading, trailing, and any non-single-space whitespace from a
/// string, in-place.
pub fn clean_text(s: &mut String) {
    let trimmed = s.trim();
    // Skip the copy/realloc if nothing to do.
    if trimmed.len() != s.len() || regex_find!(r"\s{2,}|[^\S ]", trimmed).is_some() {
        let new = regex_replace_all!(r"\s+", trimmed, " ");
        *s = new.into_owned();
    }
}

/// Repairs names broken across a line wrap in the source table.
///
/// * Whitespace runs collapse to a single space.
/// * A single trailing character split off from the preceding word is
///   rejoined (`"KENY A"` becomes `"KENYA"`).
/// * Spaces around hyphens are removed (`"FORD- KENY A"` becomes
///   `"FORD-KENYA"`).
///
/// This is a heuristic: a genuine one-letter final word is merged too.
pub fn fix_inline_spaces(text: &str) -> String {
    let mut text = text.to_string();
    clean_text(&mut text);

    let text = regex_replace!(r"(\w) (\w)$", &text, "${1}${2}");

    regex_replace_all!(r"\s*-\s*", &text, "-").trim().to_string()
}
