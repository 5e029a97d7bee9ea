//! Chapter-number detection for descriptions such as "Bab 5 Kesimpulan" or "BAB_IV".

use crate::text;
use once_cell::sync::Lazy;
use regex::Regex;

static ARABIC_CHAPTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bBAB\s+([0-9]{1,2})\b").expect("valid arabic chapter regex"));
static ROMAN_CHAPTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bBAB\s+([IVXLCDM]+)\b").expect("valid roman chapter regex"));

/// Upper-cased, separator-free form used for matching chapter markers.
pub fn normalize(description: &str) -> String {
    let stripped = text::strip_extension(description);
    let spaced = text::collapse_separators(stripped);
    text::collapse_whitespace(&spaced).to_uppercase()
}

/// Returns the chapter number when the description names one, either as
/// "BAB 3" or "BAB III".
pub fn detect_chapter(description: &str) -> Option<u32> {
    let normalized = normalize(description);

    if let Some(caps) = ARABIC_CHAPTER_RE.captures(&normalized) {
        return caps[1].parse().ok();
    }
    ROMAN_CHAPTER_RE
        .captures(&normalized)
        .and_then(|caps| decode_roman(&caps[1]))
}

fn roman_value(c: char) -> Option<u32> {
    let v = match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => return None,
    };
    Some(v)
}

/// Subtractive decoding, scanning right to left. `None` for an empty token or
/// any letter outside `IVXLCDM`.
pub fn decode_roman(token: &str) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    let mut total: u32 = 0;
    let mut max_seen: u32 = 0;
    for c in token.chars().rev() {
        let value = roman_value(c.to_ascii_uppercase())?;
        if value < max_seen {
            total = total.saturating_sub(value);
        } else {
            total = total.saturating_add(value);
            max_seen = value;
        }
    }
    Some(total)
}
