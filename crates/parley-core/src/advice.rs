//! Parsing of free-text coaching suggestions.

use once_cell::sync::Lazy;
use regex::Regex;

static ENUMERATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s*").expect("enumeration marker pattern is valid"));

/// Splits a suggestion block into one entry per line.
///
/// Leading `1. `-style markers are stripped, surrounding whitespace is
/// trimmed and blank lines are dropped.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| ENUMERATION_MARKER.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
