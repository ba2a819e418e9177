//! Text cleanup applied to every decoded caption record.
//!
//! Normalization is best-effort and never fails; a record that normalizes
//! to an empty string is dropped by the caller.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static LEADING_DASH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-").unwrap());

// A dash glued to the following word after a non-word character marks a
// second speaker inside one caption ("Yes.-No!").
static INTERIOR_DASH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\W)-(\w)").unwrap());

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Join the text lines of one record and clean them up
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    normalize_text(&joined)
}

/// Strip markup, space out dialogue dashes and collapse whitespace
pub fn normalize_text(text: &str) -> String {
    let text = TAG_REGEX.replace_all(text, "");
    let text = text.trim_start();
    let text = LEADING_DASH_REGEX.replace(text, "- ");
    let text = INTERIOR_DASH_REGEX.replace_all(&text, "${1} - ${2}");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");

    text.trim().to_string()
}
