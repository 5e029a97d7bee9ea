//! Text normalization shared by the filename classifier and the subject suggester.

use once_cell::sync::Lazy;
use regex::Regex;

static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[A-Za-z0-9]+$").expect("valid extension regex"));
static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_\-.]+").expect("valid separator regex"));
static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid punctuation regex"));

/// Drops a trailing `.ext` made of ASCII letters and digits.
pub fn strip_extension(s: &str) -> &str {
    match EXTENSION_RE.find(s) {
        Some(m) => &s[..m.start()],
        None => s,
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(s, " ").trim().to_string()
}

/// Runs of `_`, `-` and `.` become a single space.
pub fn collapse_separators(s: &str) -> String {
    SEPARATOR_RUN_RE.replace_all(s, " ").into_owned()
}

/// Every character other than ASCII letters, digits, `_` and whitespace becomes a space.
pub fn punctuation_to_spaces(s: &str) -> String {
    PUNCTUATION_RE.replace_all(s, " ").into_owned()
}

pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

pub fn char_len(token: &str) -> usize {
    token.chars().count()
}
