use crate::text;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

static DIGITS_AND_LIST_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9.,/]").expect("valid label punctuation regex"));

/// Tokens of a subject label that can take part in matching: upper-cased,
/// digits and punctuation removed, longer than `min_len`, not stop-words.
pub fn tokenize_label(
    label: &str,
    stop_words: &HashSet<String>,
    min_len: usize,
) -> BTreeSet<String> {
    let upper = label.to_uppercase();
    let stripped = DIGITS_AND_LIST_PUNCT_RE.replace_all(&upper, " ");
    let cleaned = text::punctuation_to_spaces(&stripped);
    cleaned
        .split_whitespace()
        .filter(|t| text::char_len(t) > min_len && !stop_words.contains(*t))
        .map(str::to_string)
        .collect()
}
