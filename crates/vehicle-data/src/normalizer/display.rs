//! Display labels for trims.

use lazy_static::lazy_static;
use regex::Regex;

use super::trim_name::collapse_whitespace;
use crate::models::TrimOption;

/// Label for a trim with neither a name nor a description.
pub const UNKNOWN_TRIM_LABEL: &str = "Unknown Trim";

lazy_static! {
    /// Parenthetical spec blocks, e.g. "(2.0L 4cyl Turbo 8A)"
    static ref PARENTHETICAL_REGEX: Regex =
        Regex::new(r"\([^)]*\)").expect("Invalid regex pattern");

    /// Engine displacement tokens, e.g. "2.0L"
    static ref DISPLACEMENT_TOKEN_REGEX: Regex =
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s?L\b").expect("Invalid regex pattern");
}

/// Strip parenthetical blocks and displacement tokens from a description.
pub fn clean_description(description: &str) -> String {
    let without_blocks = PARENTHETICAL_REGEX.replace_all(description, " ");
    let without_displacement = DISPLACEMENT_TOKEN_REGEX.replace_all(&without_blocks, " ");
    collapse_whitespace(&without_displacement)
        .trim_matches(|c: char| c == ',' || c == '-' || c.is_whitespace())
        .to_string()
}

/// Render a trim as a single display string.
///
/// Combines the trim name with its cleaned description, never repeating a
/// substring already present in the other part. Total: a trim with neither
/// name nor description renders as [`UNKNOWN_TRIM_LABEL`].
pub fn get_display_value(trim: &TrimOption) -> String {
    let name = collapse_whitespace(&trim.name);
    let cleaned = clean_description(&trim.description);

    let combined = match (name.is_empty(), cleaned.is_empty()) {
        (true, true) => return UNKNOWN_TRIM_LABEL.to_string(),
        (false, true) => name,
        (true, false) => cleaned,
        (false, false) => {
            if contains_words(&cleaned, &name) {
                cleaned
            } else if contains_words(&name, &cleaned) {
                name
            } else {
                format!("{} {}", name, cleaned)
            }
        }
    };

    drop_repeated_words(&combined)
}

/// Display string used wherever a trim is rendered or compared against a
/// selected value.
pub fn get_display_trim(trim: &TrimOption) -> String {
    get_display_value(trim)
}

/// Whether `needle`'s words appear as a contiguous run in `haystack`,
/// ignoring case.
fn contains_words(haystack: &str, needle: &str) -> bool {
    let hay: Vec<String> = haystack.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<String> = needle.split_whitespace().map(str::to_lowercase).collect();

    if words.is_empty() || words.len() > hay.len() {
        return false;
    }

    hay.windows(words.len()).any(|window| window == words.as_slice())
}

/// Collapse immediately repeated words ("Sport Sport" -> "Sport").
fn drop_repeated_words(value: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for word in value.split_whitespace() {
        match out.last() {
            Some(last) if last.eq_ignore_ascii_case(word) => {}
            _ => out.push(word),
        }
    }
    out.join(" ")
}
